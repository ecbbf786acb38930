use gallery::gallery::{shuffle, Gallery, DEFAULT_FOLDER};
use gallery::tree::ROOT_VALUE;

use crate::config::Context;

#[derive(clap::Parser)]
pub(crate) struct Command {
    /// Remote folder holding the gallery
    #[clap(long, default_value = DEFAULT_FOLDER)]
    folder: String,
    /// Folder path relative to the gallery, `all` for every photo
    #[clap(long, default_value = ROOT_VALUE)]
    filter: String,
    /// Display the photos in a random order
    #[clap(long)]
    shuffle: bool,
}

impl Command {
    pub(crate) async fn execute(self, ctx: &Context) -> anyhow::Result<()> {
        let mut photos = Gallery::new(ctx.client.clone(), ctx.cache())
            .with_cache_key(super::images::cache_key(&self.folder))
            .with_folder(self.folder)
            .photos(&self.filter)
            .await;
        if self.shuffle {
            shuffle(&mut photos);
        }
        println!("{}", serde_json::to_string_pretty(&photos)?);
        Ok(())
    }
}
