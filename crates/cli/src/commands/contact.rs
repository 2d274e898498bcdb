//! Contact form command.

use clap::Args;

use albarka_core::Email;
use albarka_storefront::storage::FileStore;
use albarka_storefront::Storefront;

#[derive(Args)]
pub struct ContactArgs {
    /// Your name
    #[arg(short, long)]
    name: String,

    /// Your email address
    #[arg(short, long)]
    email: String,

    /// Message subject line
    #[arg(short, long)]
    subject: String,

    /// The message body
    #[arg(short, long)]
    message: String,
}

pub fn run(
    storefront: &Storefront<FileStore>,
    args: ContactArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let email = Email::parse(&args.email)?;
    storefront.submit_contact(args.name, email, args.subject, args.message)?;
    println!("Message sent. Thanks for reaching out!");
    Ok(())
}
