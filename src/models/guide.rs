//! Static ABC syntax reference shown next to the editor

use serde::Serialize;

/// One line of the help panel
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuideEntry {
    /// Token or topic (e.g. `"X:"`)
    pub token: &'static str,
    pub description: &'static str,
}

pub const GUIDE_TITLE: &str = "ABC Notation Guide";
pub const GUIDE_INTRO: &str = "Basic syntax:";

pub const NOTATION_GUIDE: &[GuideEntry] = &[
    GuideEntry { token: "X:", description: "Tune number" },
    GuideEntry { token: "T:", description: "Title" },
    GuideEntry { token: "M:", description: "Meter (time signature)" },
    GuideEntry { token: "L:", description: "Default note length" },
    GuideEntry { token: "K:", description: "Key signature" },
    GuideEntry { token: "Notes:", description: "A-G for basic notes" },
    GuideEntry { token: "Duration:", description: "Add numbers after notes for duration" },
];

impl GuideEntry {
    /// Text as shown in the help list
    pub fn display(&self) -> String {
        match self.token {
            "Notes:" => format!("Notes: {}", self.description),
            "Duration:" => self.description.to_string(),
            token => format!("{} - {}", token, self.description),
        }
    }
}
