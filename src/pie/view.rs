use super::FULL_CIRCLE;
use super::geometry::{Point, point_at_angle, sector_bounds, sector_span};
use super::style::{Color, scale_alpha};
use super::widget::PieMenu;

/// Drawing backend. Angles are in degrees, counter-clockwise from +x, in the
/// same y-up frame as the widget.
pub trait Painter {
    type Error;

    /// Fills the annular wedge between `inner_radius` and `outer_radius`. An
    /// inner radius of 0 fills a plain pie slice.
    fn fill_arc(
        &mut self,
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        start_degrees: f64,
        sweep_degrees: f64,
        color: Color,
    ) -> Result<(), Self::Error>;

    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f64,
        start_degrees: f64,
        sweep_degrees: f64,
        width: f64,
        color: Color,
    ) -> Result<(), Self::Error>;

    fn line(&mut self, from: Point, to: Point, width: f64, color: Color)
    -> Result<(), Self::Error>;
}

struct RingRenderer<'a> {
    menu: &'a PieMenu,
    center: Point,
    inner: f64,
    outer: f64,
    start: f64,
    sweep: f64,
    alpha: f64,
}

impl<'a> RingRenderer<'a> {
    fn new(menu: &'a PieMenu, center: Point) -> Self {
        let config = menu.config();
        Self {
            menu,
            center,
            inner: config.inner_radius_length(),
            outer: config.radius(),
            start: config.start_offset_degrees(),
            sweep: menu.visual_sweep(),
            alpha: menu.alpha_scale(),
        }
    }

    fn draw<P: Painter>(&self, painter: &mut P) -> Result<(), P::Error> {
        self.draw_background(painter)?;
        self.draw_slices(painter)?;
        self.draw_separators(painter)?;
        self.draw_circumference(painter)
    }

    fn draw_background<P: Painter>(&self, painter: &mut P) -> Result<(), P::Error> {
        match self.menu.style().background {
            Some(color) => painter.fill_arc(
                self.center,
                self.inner,
                self.outer,
                self.start,
                self.sweep,
                scale_alpha(color, self.alpha),
            ),
            None => Ok(()),
        }
    }

    fn draw_slices<P: Painter>(&self, painter: &mut P) -> Result<(), P::Error> {
        let count = self.menu.child_count();
        for index in 0..count {
            let color = self.menu.slice_color(index);
            if color.alpha <= 0.0 {
                continue;
            }
            let (from, to) = sector_bounds(index, count, self.start, self.sweep);
            painter.fill_arc(self.center, self.inner, self.outer, from, to - from, color)?;
        }
        Ok(())
    }

    fn draw_separators<P: Painter>(&self, painter: &mut P) -> Result<(), P::Error> {
        let style = self.menu.style();
        let Some(color) = style.separator else {
            return Ok(());
        };
        let count = self.menu.child_count();
        if count == 0 || style.separator_width <= 0.0 {
            return Ok(());
        }

        // a closed ring shares its first and last boundary
        let closed = self.sweep >= FULL_CIRCLE;
        if closed && count == 1 {
            return Ok(());
        }
        let boundaries = if closed { count } else { count + 1 };
        let span = sector_span(count, self.sweep);

        for i in 0..boundaries {
            let angle = (self.start + i as f64 * span).to_radians();
            painter.line(
                point_at_angle(self.center, self.inner, angle),
                point_at_angle(self.center, self.outer, angle),
                style.separator_width,
                scale_alpha(color, self.alpha),
            )?;
        }
        Ok(())
    }

    fn draw_circumference<P: Painter>(&self, painter: &mut P) -> Result<(), P::Error> {
        let style = self.menu.style();
        let Some(color) = style.circumference else {
            return Ok(());
        };
        if style.circumference_width <= 0.0 {
            return Ok(());
        }
        let color = scale_alpha(color, self.alpha);
        painter.stroke_arc(
            self.center,
            self.outer,
            self.start,
            self.sweep,
            style.circumference_width,
            color,
        )?;
        if self.inner > 0.0 {
            painter.stroke_arc(
                self.center,
                self.inner,
                self.start,
                self.sweep,
                style.circumference_width,
                color,
            )?;
        }
        Ok(())
    }
}

/// Emits the ring of `menu` centered on `center`. Children are drawn by the
/// host; only the ring itself goes through the painter.
pub fn draw<P: Painter>(painter: &mut P, menu: &PieMenu, center: Point) -> Result<(), P::Error> {
    if !menu.is_visible() {
        return Ok(());
    }
    let renderer = RingRenderer::new(menu, center);
    if renderer.sweep <= 0.0 {
        return Ok(());
    }
    renderer.draw(painter)
}
