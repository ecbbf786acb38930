//! Resources needed to list the content of a remote directory

use crate::entry::Entry;
use crate::Error;

/// Only keeps the entries that can be represented as an [`Entry`].
fn parse_listing(value: serde_json::Value) -> Result<Vec<Entry>, Error> {
    let serde_json::Value::Array(items) = value else {
        return Err(Error::ResponseFormat);
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Entry>(item) {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!("skipping unsupported entry: {err}");
                None
            }
        })
        .collect())
}

impl crate::Client {
    /// List the content of a directory
    ///
    /// The path is relative to the repository root. Listing a file instead of a directory
    /// returns [`Error::ResponseFormat`].
    ///
    /// [More about it on the documentation](https://docs.github.com/en/rest/repos/contents#get-repository-content).
    ///
    /// ```no_run
    /// use gallery::builder::ClientBuilder;
    ///
    /// # tokio_test::block_on(async {
    /// let client = ClientBuilder::from_env().with_repository("octocat", "hello-world").build().unwrap();
    /// match client.list_contents("src/assets").await {
    ///   Ok(res) => println!("{} entries", res.len()),
    ///   Err(err) => eprintln!("error: {:?}", err),
    /// }
    /// # })
    /// ```
    pub async fn list_contents(&self, path: &str) -> Result<Vec<Entry>, Error> {
        let value: serde_json::Value = self.get_contents(path).await?;
        parse_listing(value)
    }
}
