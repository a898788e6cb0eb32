//! Import merger
//!
//! Adds an import statement after the last leading import of a module. With
//! no imports the statement goes after any directive prologue
//! (`"use client";`), otherwise at the top of the file.

use crate::document::Document;
use crate::edit::Edit;
use crate::scanner::Scanner;

/// Plan the insertion of `statement`.
///
/// Returns `None` when a line with exactly this statement already exists.
/// Other duplicates (same binding, different formatting) are not detected.
pub fn plan_import(document: &Document, statement: &str) -> Option<Edit> {
    let source = document.source();
    let statement = statement.trim();
    if statement.is_empty() || source.lines().any(|line| line.trim() == statement) {
        return None;
    }

    let Some(anchor) = anchor(source) else {
        return Some(Edit::insert(0, format!("{statement}\n")));
    };

    // Past anything else on the anchor's line, such as a trailing comment.
    Some(match source[anchor..].find('\n') {
        Some(newline) => Edit::insert(anchor + newline + 1, format!("{statement}\n")),
        None => Edit::insert(source.len(), format!("\n{statement}\n")),
    })
}

/// Like [`plan_import`], for a document whose managed construct starts at
/// `limit`: the import must land strictly before it.
///
/// When the line after the last import already belongs to the construct
/// (`import x from "x"; export const r = router({`), the statement goes
/// right after the anchor on its own line instead.
///
/// # Errors
///
/// The reason, when no position before `limit` exists.
pub fn plan_import_before(
    document: &Document,
    statement: &str,
    limit: usize,
) -> Result<Option<Edit>, String> {
    let Some(edit) = plan_import(document, statement) else {
        return Ok(None);
    };
    if edit.offset() < limit {
        return Ok(Some(edit));
    }

    match anchor(document.source()) {
        Some(anchor) if anchor < limit => {
            Ok(Some(Edit::insert(anchor, format!("\n{}", statement.trim()))))
        }
        _ => Err("no room for an import before the construct".to_string()),
    }
}

/// End of the last leading import, else of the directive prologue.
fn anchor(source: &str) -> Option<usize> {
    let block = Scanner::new(source).import_block();
    block.last_import_end.or(block.prologue_end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn merged(source: &str, statement: &str) -> String {
        let document = Document::from_source(source);
        match plan_import(&document, statement) {
            Some(edit) => document.apply(&[edit]).unwrap().into_source(),
            None => source.to_string(),
        }
    }

    #[test]
    fn appends_after_last_import() {
        let source = "import { a } from \"./a\";\nimport b from \"./b\"; // b\n\nconst x = 1;\n";
        assert_eq!(
            merged(source, "import { c } from \"./c\";"),
            "import { a } from \"./a\";\nimport b from \"./b\"; // b\nimport { c } from \"./c\";\n\nconst x = 1;\n"
        );
    }

    #[test]
    fn goes_to_top_without_imports() {
        assert_eq!(
            merged("const x = 1;\n", "import { c } from \"./c\";"),
            "import { c } from \"./c\";\nconst x = 1;\n"
        );
    }

    #[test]
    fn stays_below_directive_prologue() {
        assert_eq!(
            merged("\"use client\";\n\nexport default 1;\n", "import a from \"a\";"),
            "\"use client\";\nimport a from \"a\";\n\nexport default 1;\n"
        );
    }

    #[test]
    fn handles_import_on_last_line_without_newline() {
        assert_eq!(
            merged("import a from \"a\";", "import b from \"b\";"),
            "import a from \"a\";\nimport b from \"b\";\n"
        );
    }

    #[test]
    fn import_sharing_a_line_with_the_construct_stays_before_it() {
        let source = "import { router } from \"./trpc\"; export const r = router({\n});\n";
        let document = Document::from_source(source);
        let limit = source.find("({").unwrap() + 1;

        let edit = plan_import_before(&document, "import { a } from \"./a\";", limit)
            .unwrap()
            .unwrap();

        assert!(edit.offset() < limit);
        assert_eq!(
            document.apply(&[edit]).unwrap().source(),
            "import { router } from \"./trpc\";\nimport { a } from \"./a\"; export const r = router({\n});\n"
        );
    }

    #[test]
    fn no_room_before_construct_is_an_error() {
        let document = Document::from_source("{children}");
        assert!(plan_import_before(&document, "import a from \"a\";", 0).is_err());
    }

    #[test]
    fn identical_statement_is_skipped() {
        let document = Document::from_source("import a from \"a\";\n");
        assert_eq!(plan_import(&document, "import a from \"a\";"), None);
    }
}
