//! Tree editing service
//!
//! Loads a tree (saved JSON or outline), applies one edit and writes the result
//! as JSON. A rejected edit writes nothing.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::application::services::ConversionService;
use crate::application::ApplicationResult;
use crate::domain::{DomainResult, Node, NodePath, Taxonomy};
use crate::infrastructure::traits::FileSystem;

/// Source, destination and layout of one edit.
#[derive(Debug, Clone)]
pub struct EditTarget {
    pub input: PathBuf,
    pub output: PathBuf,
    pub indent: usize,
}

/// Service for renaming, adding and removing nodes of a saved tree.
pub struct EditService {
    conversion: ConversionService,
}

impl EditService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            conversion: ConversionService::new(fs),
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn rename(&self, target: &EditTarget, path: &NodePath, label: &str) -> ApplicationResult<()> {
        self.apply(target, |taxonomy| taxonomy.rename(path, label))
    }

    /// Add a node under `parent` (top level when `None`); returns its path.
    #[instrument(level = "debug", skip(self))]
    pub fn add(
        &self,
        target: &EditTarget,
        parent: Option<&NodePath>,
        label: &str,
        code: Option<&str>,
    ) -> ApplicationResult<NodePath> {
        let node = match code {
            Some(code) => Node::new(label).with_code(code),
            None => Node::new(label),
        };
        self.apply(target, |taxonomy| taxonomy.add_child(parent, node))
    }

    /// Remove the node at `path`; returns the detached subtree.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&self, target: &EditTarget, path: &NodePath) -> ApplicationResult<Node> {
        self.apply(target, |taxonomy| taxonomy.remove(path))
    }

    fn apply<T>(
        &self,
        target: &EditTarget,
        edit: impl FnOnce(&mut Taxonomy) -> DomainResult<T>,
    ) -> ApplicationResult<T> {
        let mut taxonomy = self.conversion.load(&target.input)?;
        let result = edit(&mut taxonomy)?;
        self.conversion
            .write(&taxonomy, &target.output, target.indent)?;
        info!(
            "edited {} -> {} ({} nodes)",
            target.input.display(),
            target.output.display(),
            taxonomy.node_count()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::domain::DomainError;
    use crate::infrastructure::traits::RealFileSystem;
    use tempfile::TempDir;

    fn target(dir: &TempDir, input: &str, output: &str) -> EditTarget {
        EditTarget {
            input: dir.path().join(input),
            output: dir.path().join(output),
            indent: 2,
        }
    }

    #[test]
    fn given_outline_input_when_adding_then_json_output_holds_edit() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("outline.txt"), "1 Animals\n. Birds\n").unwrap();
        let target = target(&temp, "outline.txt", "tree.json");
        let service = EditService::new(Arc::new(RealFileSystem));

        let added = service
            .add(&target, Some(&NodePath::top(0)), "Fish", None)
            .unwrap();

        assert_eq!(added.to_string(), "1.2");
        let saved = ConversionService::new(Arc::new(RealFileSystem))
            .load(&target.output)
            .unwrap();
        assert_eq!(saved.node(&added).unwrap().label, "Fish");
        // outline itself is left alone
        assert_eq!(
            std::fs::read_to_string(&target.input).unwrap(),
            "1 Animals\n. Birds\n"
        );
    }

    #[test]
    fn given_rejected_edit_when_applying_then_no_output_is_written() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("outline.txt"), "1 Animals\n").unwrap();
        let target = target(&temp, "outline.txt", "tree.json");
        let service = EditService::new(Arc::new(RealFileSystem));

        let err = service.remove(&target, &NodePath::top(3)).unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::NoSuchNode(_))
        ));
        assert!(!target.output.exists());
    }
}
