use gallery::gallery::{Gallery, CACHE_KEY, DEFAULT_FOLDER};
use gallery::walker::{Walker, DEFAULT_MAX_CONCURRENCY};

use crate::config::Context;

/// Cache key of a gallery folder, the default folder keeping the shared key
pub(super) fn cache_key(folder: &str) -> String {
    let folder = folder.trim_matches('/');
    if folder == DEFAULT_FOLDER {
        CACHE_KEY.to_string()
    } else {
        format!("{CACHE_KEY}:{folder}")
    }
}

#[derive(clap::Parser)]
pub(crate) struct Command {
    /// Remote folder to walk
    #[clap(long, default_value = DEFAULT_FOLDER)]
    folder: String,
    /// Maximum number of folders listed at the same time
    #[clap(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    max_concurrency: usize,
    /// Walk the remote folder without reading nor writing the cache
    #[clap(long)]
    fresh: bool,
}

impl Command {
    pub(crate) async fn execute(self, ctx: &Context) -> anyhow::Result<()> {
        let images = if self.fresh {
            Walker::new(&ctx.client, self.folder.as_str())
                .with_max_concurrency(self.max_concurrency)
                .try_walk(&self.folder)
                .await?
        } else {
            Gallery::new(ctx.client.clone(), ctx.cache())
                .with_cache_key(cache_key(&self.folder))
                .with_folder(self.folder)
                .with_max_concurrency(self.max_concurrency)
                .images()
                .await
        };
        tracing::debug!("found {} images", images.len());
        for (path, url) in images {
            println!("{path}\t{url}");
        }
        Ok(())
    }
}
