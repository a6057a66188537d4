//! `ParseIncremental` (§6 "Incremental API"): reparses edited source
//! and reports which byte ranges were reused versus reparsed.
//!
//! `gdscript-reader`'s arena tree has no node-reuse machinery (§9
//! redesigned it away from the teacher's cursor-resumable resolver
//! stack specifically to keep nodes as plain indices), so there is no
//! tree surgery to perform here — every call fully reparses `new_text`.
//! What this function adds over calling `gdscript_reader::parse_file`
//! directly is the *summary*: the byte ranges `changes` touched versus
//! the ranges either side of them, which a host can use to decide how
//! much downstream re-analysis to bother with. See DESIGN.md.

use gdscript_ast::Tree;
use gdscript_position::ByteSpan;
use gdscript_reader::parse_file;

/// One edit applied to produce `new_text` from the previous source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChange {
    /// Byte range in the *new* text that this edit produced.
    pub new_range: ByteSpan,
}

/// What `ParseIncremental` reports alongside the freshly parsed tree.
#[derive(Debug)]
pub struct IncrementalParseResult {
    pub tree: Tree,
    /// Union of every edit's new-text range — the region a caller
    /// should treat as "just reparsed" for the purpose of deciding
    /// what to re-highlight or re-validate first.
    pub reparsed_span: Option<ByteSpan>,
    /// Byte ranges of `new_text` outside `reparsed_span` — unedited
    /// text, even though (because there is no incremental tree reuse)
    /// its nodes were rebuilt too.
    pub reused_spans: Vec<ByteSpan>,
}

/// Reparses `new_text` and reports the edited region implied by
/// `changes`. `changes` may be empty, in which case the whole file
/// counts as reparsed.
pub fn parse_incremental(new_text: &str, changes: &[TextChange]) -> IncrementalParseResult {
    let tree = parse_file(new_text).tree;
    let reparsed_span = changes.iter().map(|c| c.new_range).reduce(|a, b| a.union(b));
    let reused_spans = match reparsed_span {
        Some(span) => {
            let mut spans = Vec::new();
            if span.start > 0 {
                spans.push(ByteSpan::new(0, span.start));
            }
            if span.end < new_text.len() {
                spans.push(ByteSpan::new(span.end, new_text.len()));
            }
            spans
        }
        None => Vec::new(),
    };
    IncrementalParseResult { tree, reparsed_span, reused_spans }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_changes_reports_no_reparsed_span() {
        let result = parse_incremental("func f():\n\tpass\n", &[]);
        assert!(result.reparsed_span.is_none());
        assert!(result.reused_spans.is_empty());
    }

    #[test]
    fn a_single_change_reports_the_surrounding_reused_spans() {
        let text = "func f():\n\tprint(1)\n";
        let edit_start = text.find("1").expect("literal present");
        let change = TextChange { new_range: ByteSpan::new(edit_start, edit_start + 1) };
        let result = parse_incremental(text, &[change]);
        assert_eq!(result.reparsed_span, Some(change.new_range));
        assert_eq!(result.reused_spans.len(), 2);
        assert_eq!(result.reused_spans[0], ByteSpan::new(0, edit_start));
        assert_eq!(result.reused_spans[1], ByteSpan::new(edit_start + 1, text.len()));
    }

    #[test]
    fn multiple_changes_union_into_one_reparsed_span() {
        let text = "func f():\n\tpass\n";
        let a = TextChange { new_range: ByteSpan::new(0, 4) };
        let b = TextChange { new_range: ByteSpan::new(10, 14) };
        let result = parse_incremental(text, &[a, b]);
        assert_eq!(result.reparsed_span, Some(ByteSpan::new(0, 14)));
    }
}
