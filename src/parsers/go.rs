use anyhow::Result;
use std::path::Path;
use tree_sitter::Node as TSNode;

use super::common::{extract_text, find_child_by_kind, find_children_by_kind, TreeSitterParser};
use super::ImportParser;

/// Extracts import paths from Go source files
pub struct GoParser {
    parser: TreeSitterParser,
}

impl GoParser {
    pub fn new() -> Result<Self> {
        let parser = TreeSitterParser::new(tree_sitter_go::language())?;
        Ok(Self { parser })
    }

    fn extract_imports(&self, root: &TSNode, source: &[u8], imports: &mut Vec<String>) {
        let mut cursor = root.walk();

        for child in root.children(&mut cursor) {
            if child.kind() == "import_declaration" {
                self.process_import(&child, source, imports);
            }
        }
    }

    fn process_import(&self, import_node: &TSNode, source: &[u8], imports: &mut Vec<String>) {
        // Grouped `import ( ... )` or a single spec
        if let Some(import_spec_list) = find_child_by_kind(import_node, "import_spec_list") {
            for import_spec in find_children_by_kind(&import_spec_list, "import_spec") {
                self.process_single_import(&import_spec, source, imports);
            }
        } else if let Some(import_spec) = find_child_by_kind(import_node, "import_spec") {
            self.process_single_import(&import_spec, source, imports);
        }
    }

    fn process_single_import(&self, import_spec: &TSNode, source: &[u8], imports: &mut Vec<String>) {
        let path_node = import_spec
            .child_by_field_name("path")
            .or_else(|| find_child_by_kind(import_spec, "interpreted_string_literal"))
            .or_else(|| find_child_by_kind(import_spec, "raw_string_literal"));

        if let Some(path_node) = path_node {
            let import_path = unquote(extract_text(&path_node, source));
            if !import_path.is_empty() {
                imports.push(import_path.to_string());
            }
        }
    }
}

/// Strip the quotes of an interpreted ("...") or raw (`...`) string literal
fn unquote(literal: &str) -> &str {
    literal.trim().trim_matches(|c| c == '"' || c == '`')
}

impl ImportParser for GoParser {
    fn parse_imports(&mut self, file_path: &Path) -> Result<Vec<String>> {
        let (tree, source) = self.parser.parse_file(file_path)?;
        let mut imports = Vec::new();
        self.extract_imports(&tree.root_node(), &source, &mut imports);
        Ok(imports)
    }
}
