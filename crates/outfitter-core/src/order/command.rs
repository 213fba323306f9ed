/// One line typed at the order prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line: start checkout with the guests in the cart
    Checkout,
    /// Fill billing details and submit the order
    Complete,
    /// The roster row after the last guest added
    Next,
    Quit,
    /// Anything else is a guest name
    Guest(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "" => Command::Checkout,
            "c" | "complete" => Command::Complete,
            "n" | "next" => Command::Next,
            "q" | "quit" => Command::Quit,
            name => Command::Guest(name.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!(Command::parse(""), Command::Checkout);
        assert_eq!(Command::parse("  \n"), Command::Checkout);
        assert_eq!(Command::parse("c"), Command::Complete);
        assert_eq!(Command::parse("complete"), Command::Complete);
        assert_eq!(Command::parse("n"), Command::Next);
        assert_eq!(Command::parse("next"), Command::Next);
        assert_eq!(Command::parse("q"), Command::Quit);
    }

    #[test]
    fn test_parse_guest_name() {
        assert_eq!(
            Command::parse(" John Smith \n"),
            Command::Guest("John Smith".to_string())
        );
        // Tokens are matched exactly
        assert_eq!(Command::parse("C"), Command::Guest("C".to_string()));
    }
}
