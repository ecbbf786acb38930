//! The http layer on top of the [repository contents API](https://docs.github.com/en/rest/repos/contents)

use crate::Error;

const ACCEPT: &str = "application/vnd.github+json";

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: String,
}

async fn read_response<T: serde::de::DeserializeOwned>(res: reqwest::Response) -> Result<T, Error> {
    let status = res.status();
    tracing::debug!("responded with status {status:?}");
    if status.is_success() {
        let body = res.bytes().await?;
        return serde_json::from_slice(&body).map_err(Error::from);
    }
    let body = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|inner| inner.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .map(String::from)
                .unwrap_or(body)
        });
    Err(Error::Protocol(status.as_u16(), message))
}

fn normalize_path(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

impl crate::Client {
    pub(crate) fn build_contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_url.trim_end_matches('/'),
            self.owner,
            self.repository,
            normalize_path(path)
        )
    }

    #[tracing::instrument(name = "get", skip(self))]
    pub(crate) async fn get_contents<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, Error> {
        let uri = self.build_contents_url(path);
        tracing::debug!("calling {uri}");
        let mut req = self.inner.get(uri).header(reqwest::header::ACCEPT, ACCEPT);
        if let Some(ref reference) = self.reference {
            req = req.query(&[("ref", reference.as_str())]);
        }
        let res = self.credentials.apply(req).send().await?;
        read_response(res).await
    }
}
