//! Announcement text catalog

/// Announcement language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    PortugueseBrazil,
}

impl Locale {
    /// BCP 47 tag, also used as the speech language
    pub fn tag(&self) -> &'static str {
        match self {
            Self::English => "en-US",
            Self::PortugueseBrazil => "pt-BR",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "english" => Some(Self::English),
            "pt" | "pt-br" | "portuguese" => Some(Self::PortugueseBrazil),
            _ => None,
        }
    }
}

/// Messages narrated by the reading-mode controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub reading_mode_activated: String,
    pub reading_mode_deactivated: String,
    pub reading_started: String,
    pub reading_finished: String,
    pub reading_stopped: String,
    pub reading_error: String,
    pub speech_unavailable: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self::english()
    }
}

impl Messages {
    pub fn english() -> Self {
        Self {
            reading_mode_activated: "reading mode activated".into(),
            reading_mode_deactivated: "reading mode deactivated".into(),
            reading_started: "reading started".into(),
            reading_finished: "reading finished".into(),
            reading_stopped: "reading stopped".into(),
            reading_error: "reading error".into(),
            speech_unavailable: "reading aloud is not available".into(),
        }
    }

    pub fn pt_br() -> Self {
        Self {
            reading_mode_activated: "Modo de leitura ativado".into(),
            reading_mode_deactivated: "Modo de leitura desativado".into(),
            reading_started: "Iniciando leitura em voz alta".into(),
            reading_finished: "Leitura concluída".into(),
            reading_stopped: "Leitura interrompida".into(),
            reading_error: "Erro durante a leitura em voz alta".into(),
            speech_unavailable: "Leitura em voz alta não disponível neste navegador".into(),
        }
    }

    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::English => Self::english(),
            Locale::PortugueseBrazil => Self::pt_br(),
        }
    }
}
