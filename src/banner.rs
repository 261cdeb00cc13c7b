//! Startup console banner

/// A `%c`-styled console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub text: String,
    pub style: &'static str,
}

impl ConsoleLine {
    pub fn new(text: impl Into<String>, style: &'static str) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

const FRAME_STYLE: &str = "color:#00ffff;font-family:monospace;font-weight:bold;font-size:13px;";
const TITLE_STYLE: &str = "color:#ff00ff;font-family:monospace;font-weight:bold;font-size:13px;";
const OK_STYLE: &str = "color:#00ff00;font-family:monospace;";
const INFO_STYLE: &str = "color:#ffff00;font-family:monospace;";
const HINT_STYLE: &str = "color:#00ffff;font-family:monospace;";
const LOADING_STYLE: &str = "color:#00ff00;font-family:monospace;font-size:14px;font-weight:bold;";

/// Banner lines printed once the page is wired up
pub fn banner(games_available: usize) -> Vec<ConsoleLine> {
    vec![
        ConsoleLine::new("╔══════════════════════════════════════╗", FRAME_STYLE),
        ConsoleLine::new("║        🕹  VARSHIL ARCADE  🕹         ║", TITLE_STYLE),
        ConsoleLine::new("╚══════════════════════════════════════╝", FRAME_STYLE),
        ConsoleLine::new(">>> System boot complete ✔", OK_STYLE),
        ConsoleLine::new(format!(">>> {} games available", games_available), INFO_STYLE),
        ConsoleLine::new(">>> Use ↑↓ keys to navigate, ENTER to launch", HINT_STYLE),
    ]
}

/// Line logged when a card is activated
pub fn loading_line(title: &str) -> ConsoleLine {
    ConsoleLine::new(format!("▶ LOADING: {}", title), LOADING_STYLE)
}
