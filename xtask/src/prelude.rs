pub use anstream::println as aprintln;

/// Tokyo Night accents used for task output.
#[derive(Debug, Clone, Copy)]
enum Accent {
    Red,
    Green,
    Blue,
    Cyan,
}

impl Accent {
    fn code(self) -> &'static str {
        match self {
            Self::Red => "\x1b[38;2;247;118;142m",
            Self::Green => "\x1b[38;2;158;206;106m",
            Self::Blue => "\x1b[38;2;122;162;247m",
            Self::Cyan => "\x1b[38;2;125;207;255m",
        }
    }

    fn paint(self, text: &str) -> String {
        format!("{}{}\x1b[0m", self.code(), text)
    }
}

pub fn p_g(text: &str) -> String {
    Accent::Green.paint(text)
}

pub fn p_r(text: &str) -> String {
    Accent::Red.paint(text)
}

pub fn p_b(text: &str) -> String {
    Accent::Blue.paint(text)
}

pub fn p_c(text: &str) -> String {
    Accent::Cyan.paint(text)
}
