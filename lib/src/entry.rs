/// A file returned by a directory listing
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct File {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub download_url: Option<String>,
}

/// A directory returned by a directory listing
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Dir {
    pub name: String,
    pub path: String,
}

/// An entry of a directory listing, tagged by its `type` field.
///
/// Other kinds of entries (symlinks, submodules) are not represented and fail to deserialize.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entry {
    File(File),
    Dir(Dir),
}

impl Entry {
    pub fn path(&self) -> &str {
        match self {
            Self::File(item) => item.path.as_str(),
            Self::Dir(item) => item.path.as_str(),
        }
    }

    pub fn as_file(&self) -> Option<&File> {
        match self {
            Self::File(value) => Some(value),
            _ => None,
        }
    }
}
