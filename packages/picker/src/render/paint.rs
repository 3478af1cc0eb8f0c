use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Line, PrimitiveStyle},
};
use u8g2_fonts::{
    fonts,
    types::{FontColor, VerticalPosition},
    FontRenderer,
};

use super::{DrawOp, Frame, Tone};

const TEXT_FONT: FontRenderer = FontRenderer::new::<fonts::u8g2_font_6x10_tf>();

/// Colour screen the picker draws on.
///
/// Drawing may be buffered; nothing is guaranteed visible before `flush`.
pub trait Panel: DrawTarget<Color = Rgb565> + OriginDimensions {
    fn flush(&mut self) -> Result<(), Self::Error>;
}

const fn tone_color(tone: Tone) -> Rgb565 {
    match tone {
        Tone::Text => Rgb565::WHITE,
        Tone::Accent => Rgb565::GREEN,
        Tone::Alert => Rgb565::RED,
    }
}

/// Clears `target` and draws every op of `frame`.
pub fn paint<T>(frame: &Frame, target: &mut T) -> Result<(), T::Error>
where
    T: DrawTarget<Color = Rgb565> + OriginDimensions,
{
    target.clear(Rgb565::BLACK)?;
    let width = target.size().width as i32;

    for op in frame.ops() {
        match op {
            DrawOp::Text { x, y, text } => {
                let drawn = TEXT_FONT.render(
                    text.as_str(),
                    Point::new(*x, *y),
                    VerticalPosition::Top,
                    FontColor::Transparent(tone_color(Tone::Text)),
                    target,
                );
                match drawn {
                    Ok(_) => {}
                    Err(u8g2_fonts::Error::DisplayError(err)) => return Err(err),
                    // Glyphs missing from the font are skipped.
                    Err(_) => {}
                }
            }
            DrawOp::Rule { y, tone } => {
                Line::new(Point::new(0, *y), Point::new(width - 1, *y))
                    .into_styled(PrimitiveStyle::with_stroke(tone_color(*tone), 1))
                    .draw(target)?;
            }
        }
    }
    Ok(())
}

/// Paints `frame` and pushes it to the glass.
pub fn present<P: Panel>(frame: &Frame, panel: &mut P) -> Result<(), P::Error> {
    paint(frame, panel)?;
    panel.flush()
}
