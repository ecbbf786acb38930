use crate::config::Context;

mod account;
mod folders;
mod images;
mod photos;
mod quote;
mod thumbnail;

#[derive(clap::Subcommand)]
pub(crate) enum Command {
    /// List the images of a remote folder and its sub folders
    Images(images::Command),
    /// Display the folder tree of the gallery
    Folders(folders::Command),
    /// List the photos of the gallery, optionally filtered by folder
    Photos(photos::Command),
    /// Resolve the url of a movie thumbnail
    Thumbnail(thumbnail::Command),
    /// Display the quote of the day
    Quote(quote::Command),
    /// Generate a school email address
    Email(account::EmailCommand),
    /// Generate a password or rate an existing one
    Password(account::PasswordCommand),
}

impl Command {
    pub(crate) fn needs_context(&self) -> bool {
        !matches!(self, Self::Email(_) | Self::Password(_))
    }

    pub(crate) async fn execute(self, ctx: Option<&Context>) -> anyhow::Result<()> {
        let require = || ctx.ok_or_else(|| anyhow::anyhow!("missing configuration"));
        match self {
            Self::Images(inner) => inner.execute(require()?).await,
            Self::Folders(inner) => inner.execute(require()?).await,
            Self::Photos(inner) => inner.execute(require()?).await,
            Self::Thumbnail(inner) => inner.execute(require()?).await,
            Self::Quote(inner) => inner.execute(require()?).await,
            Self::Email(inner) => inner.execute(),
            Self::Password(inner) => inner.execute(),
        }
    }
}
