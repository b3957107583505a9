/// Which language texts are visible. Display only, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LanguageMode {
    English,
    Spanish,
    #[default]
    Both,
}

impl LanguageMode {
    pub const ALL: [LanguageMode; 3] = [Self::English, Self::Spanish, Self::Both];

    #[must_use]
    pub fn shows_english(self) -> bool {
        matches!(self, Self::English | Self::Both)
    }

    #[must_use]
    pub fn shows_spanish(self) -> bool {
        matches!(self, Self::Spanish | Self::Both)
    }

    /// Toggle button caption.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Spanish => "Español",
            Self::Both => "Both / Ambos",
        }
    }

    /// Class put on the root element so styles can hide the other language.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::English => "show-en",
            Self::Spanish => "show-es",
            Self::Both => "show-both",
        }
    }
}
