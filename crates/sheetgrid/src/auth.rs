//! Login gate shown before the dashboard.

use crate::config::AuthConfig;
use crate::error::AuthError;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Widget;
use sheetgrid_core::input::InputEvent;
use sheetgrid_core::input::KeyCode;
use sheetgrid_core::line_input::LineInput;
use sheetgrid_core::line_input::LineInputAction;
use sheetgrid_core::line_input::LineInputOptions;
use sheetgrid_core::theme::Theme;

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl From<&AuthConfig> for Credentials {
    fn from(c: &AuthConfig) -> Self {
        Self {
            username: c.username.clone(),
            password: c.password.clone(),
        }
    }
}

/// Checks `input` against the configured credentials. The username is trimmed; the password
/// is compared exactly.
pub fn authenticate(input: &Credentials, expected: &Credentials) -> Result<(), AuthError> {
    let username = input.username.trim();
    if username.is_empty() {
        return Err(AuthError::MissingField("username"));
    }
    if input.password.is_empty() {
        return Err(AuthError::MissingField("password"));
    }
    if username == expected.username && input.password == expected.password {
        Ok(())
    } else {
        Err(AuthError::InvalidCredentials)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginAction {
    None,
    Redraw,
    Submitted(Credentials),
}

const FORM_W: u16 = 44;
const FORM_H: u16 = 9;

pub struct LoginForm {
    username: LineInput,
    password: LineInput,
    focus: LoginField,
    error: Option<AuthError>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        let theme = Theme::default();
        Self {
            username: LineInput::with_options(LineInputOptions {
                placeholder: "username".to_string(),
                placeholder_style: theme.text_muted,
                ..Default::default()
            }),
            password: LineInput::with_options(LineInputOptions {
                placeholder: "password".to_string(),
                placeholder_style: theme.text_muted,
                mask: Some('•'),
                ..Default::default()
            }),
            focus: LoginField::Username,
            error: None,
        }
    }

    pub fn error(&self) -> Option<&AuthError> {
        self.error.as_ref()
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.text().to_string(),
            password: self.password.text().to_string(),
        }
    }

    /// Shows `error` under the fields and clears the password for another attempt.
    pub fn reject(&mut self, error: AuthError) {
        self.error = Some(error);
        self.password.clear();
        self.focus = LoginField::Password;
    }

    pub fn handle_event(&mut self, event: InputEvent) -> LoginAction {
        if let InputEvent::Key(key) = &event {
            match key.code {
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                    self.focus = match self.focus {
                        LoginField::Username => LoginField::Password,
                        LoginField::Password => LoginField::Username,
                    };
                    return LoginAction::Redraw;
                }
                KeyCode::Enter => {
                    if self.focus == LoginField::Username && self.password.is_empty() {
                        self.focus = LoginField::Password;
                        return LoginAction::Redraw;
                    }
                    return LoginAction::Submitted(self.credentials());
                }
                _ => {}
            }
        }

        let input = match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        };
        match input.input(event) {
            LineInputAction::Changed => {
                self.error = None;
                LoginAction::Redraw
            }
            LineInputAction::None | LineInputAction::Submitted(_) => LoginAction::None,
        }
    }

    /// Screen position of the text cursor for the focused field.
    pub fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        let (user, pass) = field_areas(form_area(area));
        match self.focus {
            LoginField::Username => self.username.cursor_pos(user),
            LoginField::Password => self.password.cursor_pos(pass),
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let form = form_area(area);
        if form.width < 12 || form.height < FORM_H {
            return;
        }
        Block::default()
            .title(" sheetgrid · sign in ")
            .borders(Borders::ALL)
            .border_style(theme.accent)
            .render(form, buf);

        let (user, pass) = field_areas(form);
        let label_x = form.x + 2;
        for (label, field, y) in [
            ("User", LoginField::Username, user.y),
            ("Pass", LoginField::Password, pass.y),
        ] {
            let style = if self.focus == field {
                theme.accent
            } else {
                theme.text_muted
            };
            buf.set_span(label_x, y, &Span::styled(label, style), 5);
        }
        self.username.render_ref(user, buf);
        self.password.render_ref(pass, buf);

        let inner_w = form.width.saturating_sub(4);
        if let Some(err) = &self.error {
            buf.set_span(
                label_x,
                form.y + 5,
                &Span::styled(err.to_string(), theme.danger),
                inner_w,
            );
        }
        buf.set_span(
            label_x,
            form.y + 7,
            &Span::styled("tab switch • enter sign in • ctrl+c quit", theme.text_muted),
            inner_w,
        );
    }
}

fn form_area(area: Rect) -> Rect {
    let w = FORM_W.min(area.width);
    let h = FORM_H.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

fn field_areas(form: Rect) -> (Rect, Rect) {
    let x = form.x + 8;
    let w = form.width.saturating_sub(10);
    (Rect::new(x, form.y + 2, w, 1), Rect::new(x, form.y + 3, w, 1))
}
