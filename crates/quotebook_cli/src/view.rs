//! Terminal rendering of quote-book callbacks.

use quotebook_core::{Quote, QuoteView};

/// Prints notices to stderr; lists and picks only when `echo` is set, since
/// one-shot commands print their own results.
pub struct ConsoleView {
    echo: bool,
}

impl ConsoleView {
    pub fn new(echo: bool) -> Self {
        Self { echo }
    }
}

impl QuoteView for ConsoleView {
    fn show_categories(&self, categories: &[String], selected: &str) {
        if self.echo {
            println!("Categories: {} (showing `{selected}`)", categories.join(", "));
        }
    }

    fn show_quotes(&self, category: &str, quotes: &[Quote]) {
        if !self.echo {
            return;
        }
        if quotes.is_empty() {
            println!("No quotes in `{category}` yet.");
            return;
        }
        for quote in quotes {
            println!("  \"{}\" ({})", quote.text(), quote.category());
        }
    }

    fn show_quote(&self, quote: &Quote) {
        if self.echo {
            println!("> \"{}\"  -- {}", quote.text(), quote.category());
        }
    }

    fn notify(&self, message: &str) {
        eprintln!("{message}");
    }
}
