//! Guide page content
//!
//! The guide is an intro followed by collapsible sections, each from its own
//! text fragment. The fragments are compiled in; a configured content
//! directory replaces them, and a fragment that cannot be read from it is
//! logged and its section shows placeholder text.

use std::fs;
use std::path::Path;

/// Fragment holding the always-visible introduction
pub const INTRO_FILE: &str = "intro.txt";

/// Number of collapsible sections
pub const SECTION_COUNT: usize = 6;

/// Shown in place of a fragment that failed to load
pub const PLACEHOLDER: &str = "(content unavailable)";

/// Fragments compiled into the binary, used when no content directory is
/// configured
const BUNDLED_INTRO: &str = include_str!("../content/intro.txt");
const BUNDLED_SECTIONS: [&str; SECTION_COUNT] = [
    include_str!("../content/section1.txt"),
    include_str!("../content/section2.txt"),
    include_str!("../content/section3.txt"),
    include_str!("../content/section4.txt"),
    include_str!("../content/section5.txt"),
    include_str!("../content/section6.txt"),
];

/// One collapsible section
#[derive(Debug, Clone, PartialEq)]
pub struct GuideSection {
    pub title: String,
    pub body: Option<String>,
    pub open: bool,
}

impl GuideSection {
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or(PLACEHOLDER)
    }
}

/// The loaded guide
#[derive(Debug, Clone, PartialEq)]
pub struct Guide {
    pub intro: Option<String>,
    pub sections: Vec<GuideSection>,
    pub single_open: bool,
}

fn load_fragment(dir: &Path, file: &str) -> Option<String> {
    let path = dir.join(file);
    match fs::read_to_string(&path) {
        Ok(content) => Some(content),
        Err(e) => {
            log::error!("Failed to load {}: {}", path.display(), e);
            None
        }
    }
}

/// First line is the section title, the rest its body
fn split_title(index: usize, content: Option<String>) -> (String, Option<String>) {
    let fallback = format!("Section {}", index + 1);
    match content {
        Some(content) => {
            let mut parts = content.splitn(2, '\n');
            let title = parts
                .next()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .unwrap_or(fallback);
            let body = parts.next().unwrap_or("").trim().to_string();
            (title, Some(body))
        }
        None => (fallback, None),
    }
}

fn closed_section(index: usize, content: Option<String>) -> GuideSection {
    let (title, body) = split_title(index, content);
    GuideSection {
        title,
        body,
        open: false,
    }
}

impl Guide {
    /// The guide compiled into the binary
    pub fn bundled(single_open: bool) -> Self {
        Guide {
            intro: Some(BUNDLED_INTRO.trim().to_string()),
            sections: BUNDLED_SECTIONS
                .iter()
                .enumerate()
                .map(|(i, content)| closed_section(i, Some(content.to_string())))
                .collect(),
            single_open,
        }
    }

    /// Load the intro and every section fragment from `dir`
    pub fn load(dir: &Path, single_open: bool) -> Self {
        let intro = load_fragment(dir, INTRO_FILE).map(|s| s.trim().to_string());
        let sections = (0..SECTION_COUNT)
            .map(|i| closed_section(i, load_fragment(dir, &format!("section{}.txt", i + 1))))
            .collect();

        Guide {
            intro,
            sections,
            single_open,
        }
    }

    /// Content directory when configured, bundled fragments otherwise
    pub fn from_config(content_dir: Option<&Path>, single_open: bool) -> Self {
        match content_dir {
            Some(dir) => Self::load(dir, single_open),
            None => Self::bundled(single_open),
        }
    }

    pub fn intro_text(&self) -> &str {
        self.intro.as_deref().unwrap_or(PLACEHOLDER)
    }

    /// Open or close a section; in single-open mode the others close first
    pub fn toggle(&mut self, index: usize) {
        let Some(was_open) = self.sections.get(index).map(|s| s.open) else {
            return;
        };
        if self.single_open {
            for section in &mut self.sections {
                section.open = false;
            }
        }
        self.sections[index].open = !was_open;
    }

    pub fn open_count(&self) -> usize {
        self.sections.iter().filter(|s| s.open).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sheet_tui_guide_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_bundled_content_loads() {
        let guide = Guide::bundled(false);
        assert!(guide.intro.is_some());
        assert_ne!(guide.intro_text(), PLACEHOLDER);
        assert_eq!(guide.sections.len(), SECTION_COUNT);
        assert!(guide.sections.iter().all(|s| s.body.is_some()));
        assert_eq!(guide.sections[0].title, "Damage calculator");
        assert_eq!(guide.sections[5].title, "Birth date and age");
    }

    #[test]
    fn test_bundled_content_needs_no_directory() {
        let dir = std::env::temp_dir().join(format!("sheet_tui_guide_absent_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        let guide = Guide::from_config(None, false);
        assert_eq!(guide, Guide::bundled(false));

        // A configured directory overrides the bundled text
        let overridden = Guide::from_config(Some(&dir), false);
        assert_eq!(overridden.intro_text(), PLACEHOLDER);
    }

    #[test]
    fn test_missing_fragment_uses_placeholder() {
        let dir = temp_dir("missing");
        fs::write(dir.join("section2.txt"), "Damage\nHow damage works").unwrap();

        let guide = Guide::load(&dir, false);
        assert_eq!(guide.intro_text(), PLACEHOLDER);
        assert_eq!(guide.sections[0].title, "Section 1");
        assert_eq!(guide.sections[0].body_text(), PLACEHOLDER);
        assert_eq!(guide.sections[1].title, "Damage");
        assert_eq!(guide.sections[1].body_text(), "How damage works");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_independent_toggle() {
        let mut guide = Guide::bundled(false);
        guide.toggle(0);
        guide.toggle(2);
        assert_eq!(guide.open_count(), 2);
        guide.toggle(0);
        assert!(!guide.sections[0].open);
        assert!(guide.sections[2].open);
    }

    #[test]
    fn test_single_open_closes_others() {
        let mut guide = Guide::bundled(true);
        guide.toggle(0);
        guide.toggle(3);
        assert_eq!(guide.open_count(), 1);
        assert!(guide.sections[3].open);

        // Toggling the open one closes it
        guide.toggle(3);
        assert_eq!(guide.open_count(), 0);
    }

    #[test]
    fn test_toggle_out_of_range_is_ignored() {
        let mut guide = Guide::bundled(false);
        guide.toggle(SECTION_COUNT + 1);
        assert_eq!(guide.open_count(), 0);
    }
}
