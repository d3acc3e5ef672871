//! Saved address commands.

use clap::{Args, Subcommand};
use shuttle_core::AddressForm;

use crate::context::Context;

#[derive(Debug, Subcommand)]
pub enum AddressCommands {
    /// List saved addresses
    List,
    /// Save a new address
    Add {
        #[command(flatten)]
        address: AddressArgs,
    },
    /// Replace a saved address
    Update {
        address_id: String,
        #[command(flatten)]
        address: AddressArgs,
    },
    /// Delete a saved address
    Delete { address_id: String },
}

/// Address fields as flags. Blank or missing required fields are reported
/// together before anything is sent.
#[derive(Debug, Clone, Default, Args)]
pub struct AddressArgs {
    #[arg(long)]
    pub recipient: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub zipcode: Option<String>,
    #[arg(long)]
    pub line1: Option<String>,
    #[arg(long)]
    pub line2: Option<String>,
    /// Delivery memo
    #[arg(long)]
    pub memo: Option<String>,
}

impl AddressArgs {
    /// Whether any address field (other than the memo) was passed.
    pub(crate) fn is_given(&self) -> bool {
        [&self.recipient, &self.phone, &self.zipcode, &self.line1, &self.line2]
            .iter()
            .any(|f| f.is_some())
    }

    pub(crate) fn to_form(&self) -> AddressForm {
        let field = |f: &Option<String>| f.clone().unwrap_or_default();
        AddressForm {
            recipient_name: field(&self.recipient),
            phone_number: field(&self.phone),
            zipcode: field(&self.zipcode),
            address_line1: field(&self.line1),
            address_line2: field(&self.line2),
            order_memo: field(&self.memo),
        }
    }
}

pub(crate) async fn run(ctx: &Context, command: AddressCommands) -> anyhow::Result<()> {
    match command {
        AddressCommands::List => {
            let addresses = ctx.call(ctx.client.list_addresses()).await?;
            if addresses.is_empty() {
                println!("no saved addresses");
                return Ok(());
            }
            for a in &addresses {
                let default = if a.is_default { " (default)" } else { "" };
                println!(
                    "{}{default}\n    {} {}\n    [{}] {} {}",
                    a.id,
                    a.form.recipient_name,
                    a.form.phone_number,
                    a.form.zipcode,
                    a.form.address_line1,
                    a.form.address_line2
                );
            }
        }
        AddressCommands::Add { address } => {
            ctx.call(ctx.client.create_address(&address.to_form())).await?;
            println!("address saved");
        }
        AddressCommands::Update {
            address_id,
            address,
        } => {
            ctx.call(ctx.client.update_address(&address_id, &address.to_form()))
                .await?;
            println!("address {address_id} updated");
        }
        AddressCommands::Delete { address_id } => {
            ctx.call(ctx.client.delete_address(&address_id)).await?;
            println!("address {address_id} deleted");
        }
    }
    Ok(())
}
