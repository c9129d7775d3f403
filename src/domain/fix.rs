//! Code fix synthesis: turns a diagnostic into attribute insertions on its own declaration.
//!
//! Fixes never consult the hierarchy; everything they need travels with the [Diagnostic].

use crate::domain::annotation::AnnotationKind;
use crate::domain::diagnostic::Diagnostic;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Text insertion at a 0-based (line, column) position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    pub file_path: String,
    pub line: u32,
    pub column: u32,
    pub new_text: String,
}

/// One offered code action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeFix {
    pub title: String,
    pub annotation: AnnotationKind,
    pub diagnostic_id: String,
    pub edit: TextEdit,
}

/// Both actions for a diagnostic: `[NotNull]` first, then `[CanBeNull]`.
pub fn code_fixes(diagnostic: &Diagnostic, source: &str) -> Result<Vec<CodeFix>> {
    AnnotationKind::ALL
        .into_iter()
        .map(|annotation| code_fix(diagnostic, annotation, source))
        .collect()
}

/// Attribute insertion at the start of the declaration, after its existing attribute lists.
/// Fails when the host exported no declaration span: the identifier span alone would put the
/// attribute between the type and the name.
pub fn code_fix(
    diagnostic: &Diagnostic,
    annotation: AnnotationKind,
    source: &str,
) -> Result<CodeFix> {
    let Some(at) = diagnostic.location.declaration_span else {
        bail!("Diagnostic {} has no declaration span", diagnostic.id);
    };
    let new_text = if diagnostic.anchor.is_parameter() {
        format!("{annotation} ")
    } else {
        let line = at.start_line as usize;
        format!(
            "{annotation}{}{}",
            line_ending(source, line),
            line_indent(source, line)
        )
    };
    Ok(CodeFix {
        title: format!("Mark '{}' with {}", diagnostic.display_name, annotation),
        annotation,
        diagnostic_id: diagnostic.id.clone(),
        edit: TextEdit {
            file_path: diagnostic.location.file_path.clone(),
            line: at.start_line,
            column: at.start_column,
            new_text,
        },
    })
}

/// Edits annotating every given diagnostic of one file with the same annotation.
pub fn fix_all_edits<'a>(
    diagnostics: impl IntoIterator<Item = &'a Diagnostic>,
    annotation: AnnotationKind,
    source: &str,
) -> Result<Vec<TextEdit>> {
    diagnostics
        .into_iter()
        .map(|d| code_fix(d, annotation, source).map(|fix| fix.edit))
        .collect()
}

/// Applies insertions back to front so earlier positions stay valid. Identical edits are applied
/// once.
pub fn apply_edits(source: &str, edits: &[TextEdit]) -> Result<String> {
    let mut positioned = Vec::with_capacity(edits.len());
    for edit in edits {
        let Some(offset) = byte_offset(source, edit.line as usize, edit.column as usize) else {
            bail!(
                "Edit position {}:{} is outside {}",
                edit.line + 1,
                edit.column + 1,
                edit.file_path
            );
        };
        positioned.push((offset, edit));
    }
    positioned.sort_by(|a, b| b.0.cmp(&a.0));
    positioned.dedup_by(|a, b| a.0 == b.0 && a.1.new_text == b.1.new_text);

    let mut text = source.to_string();
    for (offset, edit) in positioned {
        text.insert_str(offset, &edit.new_text);
    }
    Ok(text)
}

/// Leading whitespace of a 0-based line; empty past the end.
fn line_indent(source: &str, line: usize) -> &str {
    source
        .split('\n')
        .nth(line)
        .map(|l| {
            let trimmed = l.trim_start_matches([' ', '\t']);
            &l[..l.len() - trimmed.len()]
        })
        .unwrap_or("")
}

/// Terminator of a 0-based line: `\r\n` when the line carries one, `\n` otherwise.
fn line_ending(source: &str, line: usize) -> &'static str {
    match source.split('\n').nth(line) {
        Some(l) if l.ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

/// Byte offset of a (line, char column) position; the column may sit right after the line's last
/// character.
fn byte_offset(source: &str, line: usize, column: usize) -> Option<usize> {
    let mut line_start = 0;
    for _ in 0..line {
        line_start += source[line_start..].find('\n')? + 1;
    }
    let rest = &source[line_start..];
    let content = rest.split('\n').next().unwrap_or("");
    let content = content.strip_suffix('\r').unwrap_or(content);
    if column == content.chars().count() {
        return Some(line_start + content.len());
    }
    content
        .char_indices()
        .nth(column)
        .map(|(offset, _)| line_start + offset)
}
