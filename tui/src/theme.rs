use ratatui::style::{Color, Modifier, Style};

/// Light/dark palette. The only theme state is the `dark` flag; every widget
/// receives the theme by value when it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Theme {
    pub dark: bool,
}

impl Theme {
    pub fn new(dark: bool) -> Self {
        Self { dark }
    }

    pub fn toggle(&mut self) {
        self.dark = !self.dark;
    }

    pub fn name(self) -> &'static str {
        if self.dark {
            "dark"
        } else {
            "light"
        }
    }

    fn pick(self, light: Color, dark: Color) -> Color {
        if self.dark {
            dark
        } else {
            light
        }
    }

    pub fn background(self) -> Color {
        self.pick(Color::Rgb(255, 255, 255), Color::Rgb(17, 24, 39))
    }

    pub fn foreground(self) -> Color {
        self.pick(Color::Rgb(17, 24, 39), Color::Rgb(243, 244, 246))
    }

    pub fn muted(self) -> Color {
        self.pick(Color::Rgb(75, 85, 99), Color::Rgb(156, 163, 175))
    }

    pub fn panel(self) -> Color {
        self.pick(Color::Rgb(243, 244, 246), Color::Rgb(31, 41, 55))
    }

    pub fn border(self) -> Color {
        self.pick(Color::Rgb(209, 213, 219), Color::Rgb(75, 85, 99))
    }

    pub fn accent(self) -> Color {
        self.pick(Color::Rgb(239, 68, 68), Color::Rgb(185, 28, 28))
    }

    pub fn link(self) -> Color {
        self.pick(Color::Rgb(37, 99, 235), Color::Rgb(96, 165, 250))
    }

    pub fn error(self) -> Color {
        self.pick(Color::Rgb(220, 38, 38), Color::Rgb(248, 113, 113))
    }

    pub fn success(self) -> Color {
        self.pick(Color::Rgb(22, 163, 74), Color::Rgb(74, 222, 128))
    }

    pub fn code_fg(self) -> Color {
        self.pick(Color::Rgb(190, 24, 93), Color::Rgb(244, 114, 182))
    }

    pub fn code_bg(self) -> Color {
        self.pick(Color::Rgb(229, 231, 235), Color::Rgb(55, 65, 81))
    }

    pub fn keyword(self) -> Color {
        self.pick(Color::Rgb(147, 51, 234), Color::Rgb(192, 132, 252))
    }

    pub fn string(self) -> Color {
        self.pick(Color::Rgb(21, 128, 61), Color::Rgb(134, 239, 172))
    }

    pub fn number(self) -> Color {
        self.pick(Color::Rgb(194, 65, 12), Color::Rgb(253, 186, 116))
    }

    pub fn base(self) -> Style {
        Style::default().fg(self.foreground()).bg(self.background())
    }

    pub fn dim(self) -> Style {
        Style::default().fg(self.muted())
    }

    pub fn disabled(self) -> Style {
        Style::default().fg(self.border()).add_modifier(Modifier::DIM)
    }

    pub fn inline_code(self) -> Style {
        Style::default().fg(self.code_fg()).bg(self.code_bg())
    }
}
