use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["shuttle-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert!(cli.user.is_none());
}

#[test]
fn global_user_flag_after_subcommand() {
    let cli = Cli::try_parse_from(["shuttle-cli", "cart", "count", "--user", "u1"]).unwrap();
    assert_eq!(cli.user.as_deref(), Some("u1"));
    assert!(matches!(
        cli.command,
        Some(Commands::Cart {
            command: CartCommands::Count
        })
    ));
}

#[test]
fn catalog_list_with_filters() {
    let cli = Cli::try_parse_from([
        "shuttle-cli",
        "catalog",
        "list",
        "--brand",
        "Yonex",
        "--query",
        "astrox",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Catalog {
            command: CatalogCommands::List {
                brand: Some(ref b),
                query: Some(ref q),
                thumbnails: false
            }
        }) if b == "Yonex" && q == "astrox"
    ));
}

#[test]
fn cart_add_parses_repeated_options() {
    let cli = Cli::try_parse_from([
        "shuttle-cli",
        "cart",
        "add",
        "p1",
        "--quantity",
        "2",
        "--option",
        "그립=G5",
        "--option",
        "무게=4U",
    ])
    .unwrap();
    let Some(Commands::Cart {
        command:
            CartCommands::Add {
                product_id,
                quantity,
                options,
            },
    }) = cli.command
    else {
        panic!("expected cart add");
    };
    assert_eq!(product_id, "p1");
    assert_eq!(quantity, 2);
    let pairs: Vec<(&str, &str)> = options
        .iter()
        .map(|o| (o.kind.as_str(), o.value.as_str()))
        .collect();
    assert_eq!(pairs, vec![("그립", "G5"), ("무게", "4U")]);
}

#[test]
fn cart_add_defaults_to_one() {
    let cli = Cli::try_parse_from(["shuttle-cli", "cart", "add", "p1"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Cart {
            command: CartCommands::Add { quantity: 1, ref options, .. }
        }) if options.is_empty()
    ));
}

#[test]
fn malformed_option_is_rejected() {
    let result = Cli::try_parse_from(["shuttle-cli", "cart", "add", "p1", "--option", "G5"]);
    assert!(result.is_err());
    assert!(cart::parse_option("그립=").is_err());
    assert!(cart::parse_option(" 그립 = G5 ").is_ok());
}

#[test]
fn cart_remove_accepts_comma_separated_lines() {
    let cli =
        Cli::try_parse_from(["shuttle-cli", "cart", "remove", "--line", "a,b", "--line", "c"])
            .unwrap();
    let Some(Commands::Cart {
        command: CartCommands::Remove { select },
    }) = cli.command
    else {
        panic!("expected cart remove");
    };
    assert_eq!(select.lines, vec!["a", "b", "c"]);
    assert!(!select.all);
}

#[test]
fn checkout_cart_collects_order_args() {
    let cli = Cli::try_parse_from([
        "shuttle-cli",
        "checkout",
        "cart",
        "--all",
        "--points",
        "1750",
        "--provider",
        "other",
        "--method",
        "mobile",
        "--recipient",
        "홍길동",
        "--phone",
        "01012345678",
        "--zipcode",
        "28644",
        "--line1",
        "모충로 61",
    ])
    .unwrap();
    let Some(Commands::Checkout {
        command: CheckoutCommands::Cart { select, order },
    }) = cli.command
    else {
        panic!("expected checkout cart");
    };
    assert!(select.all);
    assert_eq!(order.points, 1750);
    assert!(!order.apportion_points);
    assert_eq!(order.provider, "other");
    assert_eq!(order.method.as_deref(), Some("mobile"));
    assert!(order.address.is_given());
    let form = order.address.to_form();
    assert_eq!(form.zipcode, "28644");
    assert!(form.address_line2.is_empty());
    assert!(form.validate().is_ok());
}

#[test]
fn checkout_defaults_to_tosspay_and_saved_address() {
    let cli = Cli::try_parse_from(["shuttle-cli", "checkout", "buy-now", "p7"]).unwrap();
    let Some(Commands::Checkout {
        command:
            CheckoutCommands::BuyNow {
                product_id,
                quantity,
                order,
                ..
            },
    }) = cli.command
    else {
        panic!("expected checkout buy-now");
    };
    assert_eq!(product_id, "p7");
    assert_eq!(quantity, 1);
    assert_eq!(order.provider, "tosspay");
    assert_eq!(order.points, 0);
    assert!(order.address_id.is_none());
    assert!(!order.address.is_given());
}

#[test]
fn memo_alone_does_not_count_as_inline_address() {
    let args = address::AddressArgs {
        memo: Some("문 앞".to_string()),
        ..Default::default()
    };
    assert!(!args.is_given());
}

#[test]
fn login_provider_is_parsed() {
    let cli = Cli::try_parse_from([
        "shuttle-cli",
        "account",
        "login",
        "--provider",
        "kakao",
        "--token",
        "tok",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Account {
            command: AccountCommands::Login {
                provider: shuttle_core::LoginProvider::Kakao,
                ..
            }
        })
    ));

    let bad = Cli::try_parse_from([
        "shuttle-cli",
        "account",
        "login",
        "--provider",
        "naver",
        "--token",
        "tok",
    ]);
    assert!(bad.is_err());
}

#[test]
fn coupons_list_available_flag() {
    let cli = Cli::try_parse_from(["shuttle-cli", "coupons", "list", "--available"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Coupons {
            command: CouponCommands::List { available: true }
        })
    ));
}

#[test]
fn payment_result_parses_outcomes() {
    assert!(checkout::run_payment_result(r#"{"paymentId":"payment-1-abc","txId":"tx-1"}"#).is_ok());
    let failed = checkout::run_payment_result(
        r#"{"paymentId":"payment-1-abc","code":"FAILURE_TYPE_PG","message":"한도 초과"}"#,
    );
    assert!(failed.unwrap_err().to_string().contains("FAILURE_TYPE_PG"));
    assert!(checkout::run_payment_result("not json").is_err());
}
