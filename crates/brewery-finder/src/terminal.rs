//! Plain-text view port for the terminal.
//!
//! Writes each part of the page as it is drawn. Write failures cannot be
//! returned through [`ViewPort`], so the first one is kept and handed back
//! by [`TerminalPort::take_error`].

use std::io::{self, Write};

use brewery_core::{BreweryCard, CityOption, ViewPort};
use brewery_types::StatusStyle;

/// Draws the page on any writer, usually stdout.
#[derive(Debug)]
pub struct TerminalPort<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TerminalPort<W> {
    /// Draw on `out`.
    pub const fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Print a message outside the page itself (help, command errors).
    pub fn notice(&mut self, message: &str) {
        self.write(format_args!("{message}\n"));
    }

    /// The first write failure since the last call, if any.
    pub const fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Consume the port and return its writer.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, args: std::fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_fmt(args).and_then(|()| self.out.flush()) {
            self.error = Some(e);
        }
    }
}

impl<W: Write> ViewPort for TerminalPort<W> {
    fn set_heading(&mut self, heading: &str) {
        self.write(format_args!("\n== {heading} ==\n"));
    }

    fn set_status(&mut self, label: &str, style: StatusStyle) {
        self.write(format_args!("[{}] {label}\n", style.class_name()));
    }

    fn clear_list(&mut self) {}

    fn append_card(&mut self, card: &BreweryCard) {
        self.write(format_args!(
            "  * {} ({})\n      {}\n      {}\n      phone: {}\n",
            card.name, card.brewery_type, card.street, card.locality, card.phone
        ));
        if let Some(url) = &card.website_url {
            self.write(format_args!("      web: {url}\n"));
        }
    }

    fn show_placeholder(&mut self, message: &str) {
        self.write(format_args!("  ({message})\n"));
    }

    fn set_city_options(&mut self, options: &[CityOption]) {
        if options.is_empty() {
            return;
        }
        let boxes: Vec<String> = options
            .iter()
            .map(|city| {
                let mark = if city.checked { 'x' } else { ' ' };
                format!("[{mark}] {}", city.name)
            })
            .collect();
        self.write(format_args!("cities: {}\n", boxes.join("  ")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(port: TerminalPort<Vec<u8>>) -> String {
        String::from_utf8(port.into_inner()).unwrap_or_default()
    }

    #[test]
    fn draws_cards_and_cities() {
        let mut port = TerminalPort::new(Vec::new());
        port.set_heading("List of Breweries for 'OH'");
        port.set_status("Done [1 breweries, 1 cities]", StatusStyle::Done);
        port.clear_list();
        port.append_card(&BreweryCard {
            name: "Great Lakes Brewing".to_owned(),
            brewery_type: "brewpub".to_owned(),
            street: "2516 Market Ave".to_owned(),
            locality: "Cleveland, 44113".to_owned(),
            phone: "N/A".to_owned(),
            website_url: Some("http://www.greatlakesbrewing.com".to_owned()),
        });
        port.set_city_options(&[CityOption {
            name: "Cleveland".to_owned(),
            checked: true,
        }]);

        assert!(port.take_error().is_none());
        let text = rendered(port);
        assert!(text.contains("== List of Breweries for 'OH' =="));
        assert!(text.contains("[status-done] Done [1 breweries, 1 cities]"));
        assert!(text.contains("* Great Lakes Brewing (brewpub)"));
        assert!(text.contains("phone: N/A"));
        assert!(text.contains("web: http://www.greatlakesbrewing.com"));
        assert!(text.contains("cities: [x] Cleveland"));
    }

    #[test]
    fn draws_placeholder() {
        let mut port = TerminalPort::new(Vec::new());
        port.show_placeholder("No state selected");
        port.set_city_options(&[]);
        assert_eq!(rendered(port), "  (No state selected)\n");
    }

    /// Writer that always fails.
    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn keeps_first_write_error() {
        let mut port = TerminalPort::new(Broken);
        port.set_heading("x");
        port.notice("y");
        let error = port.take_error();
        assert_eq!(error.map(|e| e.kind()), Some(io::ErrorKind::BrokenPipe));
        assert!(port.take_error().is_none());
    }
}
