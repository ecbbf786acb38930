//! Folder hierarchy built from flat image paths, used to filter galleries

use std::collections::HashMap;

/// Name given to the root of every tree
pub const ROOT_NAME: &str = "All Photos";
/// Value of the root in a flattened tree
pub const ROOT_VALUE: &str = "all";

/// A folder and the number of files it contains, at any depth
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct FolderNode {
    pub name: String,
    /// Slash separated path from the root, empty for the root itself
    pub path: String,
    pub count: usize,
    /// Sub folders, in the order they were first seen
    pub children: Vec<FolderNode>,
}

/// An option of a folder selection list
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct FolderOption {
    pub label: String,
    pub value: String,
    pub count: usize,
}

#[derive(Default)]
struct Slot {
    name: String,
    path: String,
    count: usize,
    children: Vec<usize>,
}

impl Slot {
    fn into_node(idx: usize, slots: &mut [Slot]) -> FolderNode {
        let slot = std::mem::take(&mut slots[idx]);
        FolderNode {
            name: slot.name,
            path: slot.path,
            count: slot.count,
            children: slot
                .children
                .into_iter()
                .map(|child| Self::into_node(child, slots))
                .collect(),
        }
    }
}

impl FolderNode {
    /// An empty root node
    pub fn root() -> Self {
        Self {
            name: ROOT_NAME.to_string(),
            path: String::new(),
            count: 0,
            children: Vec::new(),
        }
    }

    /// Builds the tree of folders containing the given file paths.
    ///
    /// The last segment of every path is the file name. Each file is counted once by every
    /// folder above it, including the root. Files without folder only count at the root.
    pub fn build<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let mut slots = vec![Slot {
            name: ROOT_NAME.to_string(),
            ..Default::default()
        }];
        let mut lookup: HashMap<String, usize> = HashMap::new();
        let mut ancestors: Vec<usize> = Vec::new();

        for path in paths {
            let mut segments: Vec<&str> = path
                .as_ref()
                .split('/')
                .filter(|segment| !segment.is_empty())
                .collect();
            segments.pop();

            ancestors.clear();
            let mut parent = 0;
            let mut current = String::new();
            for segment in segments {
                if !current.is_empty() {
                    current.push('/');
                }
                current.push_str(segment);
                let idx = match lookup.get(&current) {
                    Some(idx) => *idx,
                    None => {
                        let idx = slots.len();
                        slots.push(Slot {
                            name: segment.to_string(),
                            path: current.clone(),
                            ..Default::default()
                        });
                        slots[parent].children.push(idx);
                        lookup.insert(current.clone(), idx);
                        idx
                    }
                };
                ancestors.push(idx);
                parent = idx;
            }

            slots[0].count += 1;
            for idx in ancestors.iter() {
                slots[*idx].count += 1;
            }
        }

        Slot::into_node(0, &mut slots)
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Looks for the folder with the given path in this node and its descendants
    pub fn find(&self, path: &str) -> Option<&FolderNode> {
        if self.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(path))
    }

    fn flatten_children(&self, level: usize, result: &mut Vec<FolderOption>) {
        for child in self.children.iter() {
            result.push(FolderOption {
                label: format!("{}{} ({})", "  ".repeat(level), child.name, child.count),
                value: child.path.clone(),
                count: child.count,
            });
            child.flatten_children(level + 1, result);
        }
    }

    /// Lists this folder followed by all its descendants, depth first.
    ///
    /// Labels are indented by two spaces per level below the first one and end with the count.
    pub fn flatten(&self) -> Vec<FolderOption> {
        let mut result = vec![FolderOption {
            label: format!("{} ({})", self.name, self.count),
            value: if self.is_root() {
                ROOT_VALUE.to_string()
            } else {
                self.path.clone()
            },
            count: self.count,
        }];
        self.flatten_children(0, &mut result);
        result
    }
}
