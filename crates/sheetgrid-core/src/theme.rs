use ratatui::style::Modifier;
use ratatui::style::Style;

#[derive(Clone, Debug)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub danger: Style,
    pub header: Style,
    pub cursor_row: Style,
    pub overlay: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            accent: Style::default().cyan(),
            danger: Style::default().red(),
            header: Style::default().cyan().add_modifier(Modifier::BOLD),
            cursor_row: Style::default().add_modifier(Modifier::REVERSED),
            overlay: Style::default().yellow().add_modifier(Modifier::BOLD),
        }
    }
}
