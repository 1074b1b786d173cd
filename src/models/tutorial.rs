// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Static tutorials catalog.
//!
//! Categories of camera movements, cuts and transitions, each linking to an
//! external video.

/// Category shown when the tutorials page opens.
pub const DEFAULT_CATEGORY: &str = "Camera Movements";

/// Shown for a category with no entries.
pub const EMPTY_CATEGORY_MESSAGE: &str = "No tutorials yet for this section.";

/// One tutorial entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tutorial {
    pub title: &'static str,
    pub description: &'static str,
    /// YouTube embed URL.
    pub url: &'static str,
}

/// A named, ordered group of tutorials.
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub name: &'static str,
    pub entries: &'static [Tutorial],
}

const CAMERA_MOVEMENTS: &[Tutorial] = &[
    Tutorial {
        title: "Pan",
        description: "Horizontal movement from a fixed axis — camera pans left to right.",
        url: "https://www.youtube.com/embed/avdpM1cvWcI",
    },
    Tutorial {
        title: "Tilt",
        description: "Camera tilts vertically up or down while staying in place.",
        url: "https://www.youtube.com/embed/3blhXQ_cU_E",
    },
    Tutorial {
        title: "Zoom",
        description: "Zooming in/out using the camera lens — not physical movement.",
        url: "https://www.youtube.com/embed/87e4DN-86NE",
    },
    Tutorial {
        title: "Tracking Shot",
        description: "The camera physically follows the subject as it moves.",
        url: "https://www.youtube.com/embed/6Kpr2MuKW0A",
    },
    Tutorial {
        title: "Crane Shot",
        description: "Camera moves vertically (high ↕ low) using a crane or jib.",
        url: "https://www.youtube.com/embed/tjGHBjxVvqg",
    },
];

const CUTS: &[Tutorial] = &[
    Tutorial {
        title: "Match Cut",
        description: "A seamless transition between two similar visual elements or movements.",
        url: "https://www.youtube.com/embed/2T42o9LsNm0?start=45",
    },
    Tutorial {
        title: "Jump Cut",
        description: "An abrupt cut forward in time, breaking continuity but often used stylistically.",
        url: "https://www.youtube.com/embed/2T42o9LsNm0?start=105",
    },
    Tutorial {
        title: "J Cut",
        description: "Audio from the next scene plays before the visual appears, creating anticipation.",
        url: "https://www.youtube.com/embed/2T42o9LsNm0?start=165",
    },
    Tutorial {
        title: "L Cut",
        description: "Audio from the current scene continues over the visuals of the next scene.",
        url: "https://www.youtube.com/embed/2T42o9LsNm0?start=225",
    },
    Tutorial {
        title: "Smash Cut",
        description: "A sudden, dramatic shift in tone or action between scenes. Often used for humor or shock.",
        url: "https://www.youtube.com/embed/2T42o9LsNm0?start=285",
    },
];

const TRANSITIONS: &[Tutorial] = &[
    Tutorial {
        title: "Cross Dissolve",
        description: "A smooth fade between two scenes, often used to signify a passage of time or a soft transition.",
        url: "https://www.youtube.com/embed/J6YPU-pJnuU",
    },
    Tutorial {
        title: "Fade In / Fade Out",
        description: "Scenes gradually appear from or disappear to black, commonly used at the beginning or end of scenes.",
        url: "https://www.youtube.com/embed/-NKdUh7mLrI",
    },
    Tutorial {
        title: "Wipe",
        description: "One scene replaces another by moving across the screen, often used to indicate a change in location or time.",
        url: "https://www.youtube.com/embed/gceCw-Z3po8",
    },
    Tutorial {
        title: "Morph Cut",
        description: "A seamless transition that blends similar shots, often used to hide jump cuts in interviews.",
        url: "https://www.youtube.com/embed/8dv9GBSN5k8",
    },
    Tutorial {
        title: "Zoom Transition",
        description: "A dynamic zoom effect that transitions between scenes, adding energy and focus.",
        url: "https://www.youtube.com/embed/MUEfz83WIa8",
    },
];

static CATALOG: &[Category] = &[
    Category {
        name: "Camera Movements",
        entries: CAMERA_MOVEMENTS,
    },
    Category {
        name: "Cuts",
        entries: CUTS,
    },
    Category {
        name: "Transitions",
        entries: TRANSITIONS,
    },
];

/// All categories in display order.
pub fn categories() -> &'static [Category] {
    CATALOG
}

/// Entries of `category`, empty if the category is unknown or has none.
pub fn entries(category: &str) -> &'static [Tutorial] {
    CATALOG
        .iter()
        .find(|c| c.name == category)
        .map(|c| c.entries)
        .unwrap_or(&[])
}

/// Selection state of the tutorials page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorialsState {
    active: String,
}

impl Default for TutorialsState {
    fn default() -> Self {
        Self {
            active: DEFAULT_CATEGORY.to_string(),
        }
    }
}

impl TutorialsState {
    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn select(&mut self, category: &str) {
        self.active = category.to_string();
    }

    pub fn visible_entries(&self) -> &'static [Tutorial] {
        entries(&self.active)
    }

    /// Message to show instead of entries, if any.
    pub fn empty_message(&self) -> Option<&'static str> {
        if self.visible_entries().is_empty() {
            Some(EMPTY_CATEGORY_MESSAGE)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order() {
        let names: Vec<&str> = categories().iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Camera Movements", "Cuts", "Transitions"]);
    }

    #[test]
    fn test_cuts_has_five_entries_in_order() {
        let mut state = TutorialsState::default();
        state.select("Cuts");

        let titles: Vec<&str> = state.visible_entries().iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Match Cut", "Jump Cut", "J Cut", "L Cut", "Smash Cut"]);
        assert_eq!(state.empty_message(), None);
    }

    #[test]
    fn test_default_category() {
        let state = TutorialsState::default();
        assert_eq!(state.active(), "Camera Movements");
        assert_eq!(state.visible_entries()[0].title, "Pan");
    }

    #[test]
    fn test_empty_category_shows_message() {
        let mut state = TutorialsState::default();
        state.select("Lighting");
        assert!(state.visible_entries().is_empty());
        assert_eq!(state.empty_message(), Some(EMPTY_CATEGORY_MESSAGE));
    }

    #[test]
    fn test_every_entry_has_embed_url() {
        for category in categories() {
            for tutorial in category.entries {
                assert!(
                    tutorial.url.starts_with("https://www.youtube.com/embed/"),
                    "{} / {}",
                    category.name,
                    tutorial.title
                );
            }
        }
    }
}
