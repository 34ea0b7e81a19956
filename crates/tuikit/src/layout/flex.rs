//! One-axis layout: split an area into consecutive slots

use super::{Constraint, Direction};
use crate::geometry::Rect;

/// Layout builder along a single axis
#[derive(Debug, Clone, Default)]
pub struct Layout {
    direction: Direction,
    constraints: Vec<Constraint>,
    spacing: u16,
}

impl Layout {
    pub fn horizontal() -> Self {
        Self::new(Direction::Horizontal)
    }

    pub fn vertical() -> Self {
        Self::new(Direction::Vertical)
    }

    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            constraints: Vec::new(),
            spacing: 0,
        }
    }

    pub fn constraints<I: IntoIterator<Item = Constraint>>(mut self, constraints: I) -> Self {
        self.constraints = constraints.into_iter().collect();
        self
    }

    /// Gap between consecutive slots
    pub fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }

    /// Split `area`; slots that overflow are clipped to it
    pub fn split(&self, area: Rect) -> Vec<Rect> {
        if self.constraints.is_empty() {
            return vec![];
        }
        let (total, start) = match self.direction {
            Direction::Horizontal => (area.width, area.x),
            Direction::Vertical => (area.height, area.y),
        };
        resolve(&self.constraints, total, self.spacing)
            .into_iter()
            .map(|(offset, size)| {
                let rect = match self.direction {
                    Direction::Horizontal => {
                        Rect::new(start.saturating_add(offset), area.y, size, area.height)
                    }
                    Direction::Vertical => {
                        Rect::new(area.x, start.saturating_add(offset), area.width, size)
                    }
                };
                rect.intersect(&area)
            })
            .collect()
    }
}

/// Resolve constraints along an axis of `total` cells into `(offset, size)`
/// pairs, with `spacing` cells between neighbours.
///
/// Fixed and percentage slots are sized first. The rest is shared between
/// flexible slots by weight; a slot whose share falls outside its min/max is
/// pinned to that bound and the share is recomputed for the others.
pub(crate) fn resolve(constraints: &[Constraint], total: u16, spacing: u16) -> Vec<(u16, u16)> {
    let gaps = constraints.len().saturating_sub(1) as u32 * spacing as u32;
    let available = (total as u32).saturating_sub(gaps);

    let mut sizes: Vec<Option<u32>> = constraints
        .iter()
        .map(|c| (!c.is_flexible()).then(|| c.resolve_fixed(available as u16) as u32))
        .collect();
    let fixed: u32 = sizes.iter().flatten().sum();
    let flex_space = available.saturating_sub(fixed);

    loop {
        let pinned: u32 = constraints
            .iter()
            .zip(&sizes)
            .filter(|(c, s)| c.is_flexible() && s.is_some())
            .map(|(_, s)| s.unwrap_or(0))
            .sum();
        let open: Vec<usize> = (0..constraints.len()).filter(|&i| sizes[i].is_none()).collect();
        if open.is_empty() {
            break;
        }
        let space = flex_space.saturating_sub(pinned);
        let weight: u32 = open.iter().map(|&i| constraints[i].fill_weight() as u32).sum();

        let mut shares: Vec<(usize, u32)> = open
            .iter()
            .map(|&i| {
                let share = if weight == 0 {
                    0
                } else {
                    space * constraints[i].fill_weight() as u32 / weight
                };
                (i, share)
            })
            .collect();
        // rounding leftovers go to the last weighted slot
        let handed_out: u32 = shares.iter().map(|(_, s)| s).sum();
        if let Some(last) = shares
            .iter_mut()
            .rev()
            .find(|(i, _)| constraints[*i].fill_weight() > 0)
        {
            last.1 += space.saturating_sub(handed_out);
        }

        let mut clamped = false;
        for &(i, share) in &shares {
            let (min, max) = (constraints[i].minimum() as u32, constraints[i].maximum() as u32);
            if share < min {
                sizes[i] = Some(min);
                clamped = true;
            } else if share > max {
                sizes[i] = Some(max);
                clamped = true;
            }
        }
        if !clamped {
            for (i, share) in shares {
                sizes[i] = Some(share);
            }
            break;
        }
    }

    let mut offset = 0u32;
    sizes
        .into_iter()
        .map(|size| {
            let size = size.unwrap_or(0).min(u16::MAX as u32);
            let slot = (offset.min(u16::MAX as u32) as u16, size as u16);
            offset += size + spacing as u32;
            slot
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_split_with_fill() {
        let chunks = Layout::vertical()
            .constraints([Constraint::Fixed(10), Constraint::Fill(1), Constraint::Fixed(5)])
            .split(Rect::new(0, 0, 100, 50));
        assert_eq!(chunks[0].height, 10);
        assert_eq!(chunks[1], Rect::new(0, 10, 100, 35));
        assert_eq!(chunks[2].y, 45);
    }

    #[test]
    fn test_multiple_fills_share_by_weight() {
        let chunks = Layout::vertical()
            .constraints([Constraint::Fill(1), Constraint::Fill(2), Constraint::Fill(1)])
            .split(Rect::sized(100, 100));
        let heights: Vec<u16> = chunks.iter().map(|r| r.height).collect();
        assert_eq!(heights, vec![25, 50, 25]);
    }

    #[test]
    fn test_range_caps_and_hands_the_rest_on() {
        let sizes = resolve(
            &[Constraint::range(1, 10, 20), Constraint::Fill(1)],
            100,
            0,
        );
        assert_eq!(sizes, vec![(0, 20), (20, 80)]);
    }

    #[test]
    fn test_range_minimum_wins_when_tight() {
        let sizes = resolve(&[Constraint::range(1, 10, 50), Constraint::Fill(3)], 16, 0);
        assert_eq!(sizes, vec![(0, 10), (10, 6)]);
    }

    #[test]
    fn test_spacing() {
        let chunks = Layout::horizontal()
            .spacing(2)
            .constraints([Constraint::Fixed(10), Constraint::Fixed(10), Constraint::Fixed(10)])
            .split(Rect::sized(100, 1));
        let xs: Vec<u16> = chunks.iter().map(|r| r.x).collect();
        assert_eq!(xs, vec![0, 12, 24]);
    }

    #[test]
    fn test_overflow_is_clipped() {
        let chunks = Layout::horizontal()
            .constraints([Constraint::Fixed(8), Constraint::Fixed(8)])
            .split(Rect::sized(10, 1));
        assert_eq!(chunks[1], Rect::new(8, 0, 2, 1));
    }
}
