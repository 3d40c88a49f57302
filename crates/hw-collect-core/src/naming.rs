//! Name rules shared by the consolidator, the roster, and folder detection.
//!
//! All suffix checks are ASCII case-insensitive so `.pdf`, `.PDF` and `.Pdf`
//! are handled the same way everywhere.

pub const HIDDEN_PREFIX: char = '.';
pub const PDF_SUFFIX: &str = ".pdf";
pub const HTML_SUFFIX: &str = ".html";

pub fn is_hidden(name: &str) -> bool {
    name.starts_with(HIDDEN_PREFIX)
}

pub fn ends_with_ignore_case(name: &str, suffix: &str) -> bool {
    if name.len() < suffix.len() {
        return false;
    }
    let split = name.len() - suffix.len();
    name.is_char_boundary(split) && name[split..].eq_ignore_ascii_case(suffix)
}

pub fn is_pdf(name: &str) -> bool {
    ends_with_ignore_case(name, PDF_SUFFIX)
}

pub fn is_html(name: &str) -> bool {
    ends_with_ignore_case(name, HTML_SUFFIX)
}

/// Extension of `name` from the last `.` onward, dot included.
///
/// Leading dots do not start an extension, so `.profile` and `..` have none.
pub fn extension(name: &str) -> Option<&str> {
    let dot = name.rfind('.')?;
    if name[..dot].chars().any(|c| c != '.') {
        Some(&name[dot..])
    } else {
        None
    }
}

/// Canonical per-student folder name: `"{id} ({name})"`.
pub fn expected_folder_name(student_id: &str, student_name: &str) -> String {
    format!("{} ({})", student_id, student_name)
}

/// PDFs keep their name; everything else is prefixed with the student folder.
pub fn destination_file_name(folder_name: &str, file_name: &str) -> String {
    if is_pdf(file_name) {
        file_name.to_string()
    } else {
        format!("{}_{}", folder_name, file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_matching_ignores_case() {
        assert!(is_pdf("report.pdf"));
        assert!(is_pdf("REPORT.PDF"));
        assert!(is_pdf("Report.Pdf"));
        assert!(!is_pdf("report.pdf.txt"));
        assert!(!is_pdf("pdf"));
        assert!(is_html("index.HTML"));
        assert!(!is_html("index.htm"));
    }

    #[test]
    fn test_suffix_matching_on_multibyte_names() {
        assert!(is_pdf("作業一.pdf"));
        assert!(!ends_with_ignore_case("作業", ".pdf"));
        assert!(!ends_with_ignore_case("é", "x"));
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("notes.docx"), Some(".docx"));
        assert_eq!(extension("archive.tar.gz"), Some(".gz"));
        assert_eq!(extension("Makefile"), None);
        assert_eq!(extension(".profile"), None);
        assert_eq!(extension("..hidden"), None);
        assert_eq!(extension("trailing."), Some("."));
        assert_eq!(extension("CAPS.TXT"), Some(".TXT"));
    }

    #[test]
    fn test_destination_file_name() {
        let folder = expected_folder_name("1003", "Carol");
        assert_eq!(folder, "1003 (Carol)");
        assert_eq!(destination_file_name(&folder, "hw.PDF"), "hw.PDF");
        assert_eq!(
            destination_file_name(&folder, "notes.docx"),
            "1003 (Carol)_notes.docx"
        );
    }

    #[test]
    fn test_hidden() {
        assert!(is_hidden(".DS_Store"));
        assert!(!is_hidden("report.pdf"));
    }
}
