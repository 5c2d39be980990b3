use anyhow::Result;
use std::fs;
use std::path::Path;
use tree_sitter::{Language, Node as TSNode, Parser, Tree};

pub struct TreeSitterParser {
    parser: Parser,
}

impl TreeSitterParser {
    pub fn new(language: Language) -> Result<Self> {
        let mut parser = Parser::new();
        parser.set_language(language)?;
        Ok(Self { parser })
    }

    /// Parse a file and hand back both the tree and the bytes it was built
    /// from. Sources are not required to be valid UTF-8.
    pub fn parse_file(&mut self, file_path: &Path) -> Result<(Tree, Vec<u8>)> {
        let source = fs::read(file_path)?;
        let tree = self
            .parser
            .parse(&source, None)
            .ok_or_else(|| anyhow::anyhow!("Failed to parse file: {}", file_path.display()))?;
        Ok((tree, source))
    }
}

pub fn extract_text<'a>(node: &TSNode, source: &'a [u8]) -> &'a str {
    std::str::from_utf8(&source[node.byte_range()]).unwrap_or("")
}

pub fn find_child_by_kind<'a>(node: &'a TSNode, kind: &str) -> Option<TSNode<'a>> {
    for child in node.children(&mut node.walk()) {
        if child.kind() == kind {
            return Some(child);
        }
    }
    None
}

pub fn find_children_by_kind<'a>(node: &'a TSNode<'a>, kind: &str) -> Vec<TSNode<'a>> {
    let mut results = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == kind {
            results.push(child);
        }
    }
    results
}
