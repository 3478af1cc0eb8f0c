use core::fmt::{self, Write};

use heapless::String;

pub const LINE_MAX: usize = 64;

pub type Line = String<LINE_MAX>;

/// Writer that keeps whatever fits and drops the rest.
struct Clipped<'a>(&'a mut Line);

impl Write for Clipped<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            if self.0.push(ch).is_err() {
                break;
            }
        }
        Ok(())
    }
}

pub fn line(args: fmt::Arguments<'_>) -> Line {
    let mut out = Line::new();
    let _ = Clipped(&mut out).write_fmt(args);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlong_text_is_clipped() {
        let long = "x".repeat(LINE_MAX + 10);
        let out = line(format_args!("> {}", long));
        assert_eq!(out.len(), LINE_MAX);
        assert!(out.starts_with("> x"));
    }
}
