//! Route pattern registry
//!
//! Each pattern name maps to a pure rule `(start, depth, direction) ->
//! (end, control?)`, with depth already in normalized units. Lateral signs are
//! relative to the side of the field the receiver starts on: "outward" moves
//! toward the near sideline, "inward" toward the middle. An explicit
//! `direction` flips the default break.
//!
//! Unknown patterns run the `go` rule. Every shape handed out by
//! [`RouteRegistry::shape`] is clamped into the safe box.

use crate::models::{Point, RouteDirection};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Rule output before clamping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteShape {
    pub end: Point,
    pub control: Option<Point>,
}

pub type RouteRule = fn(Point, f64, Option<RouteDirection>) -> RouteShape;

/// Sideline-ward unit sign; `Inside` reverses it
fn outward(start: Point, dir: Option<RouteDirection>) -> f64 {
    match dir {
        Some(RouteDirection::Inside) => -start.side(),
        _ => start.side(),
    }
}

/// Middle-ward unit sign; `Outside` reverses it
fn inward(start: Point, dir: Option<RouteDirection>) -> f64 {
    match dir {
        Some(RouteDirection::Outside) => start.side(),
        _ => -start.side(),
    }
}

fn straight(end: Point) -> RouteShape {
    RouteShape { end, control: None }
}

fn curved(end: Point, control: Point) -> RouteShape {
    RouteShape { end, control: Some(control) }
}

fn slant(s: Point, d: f64, dir: Option<RouteDirection>) -> RouteShape {
    straight(s.offset(0.1 * inward(s, dir), d))
}

fn out(s: Point, d: f64, dir: Option<RouteDirection>) -> RouteShape {
    straight(s.offset(0.1 * outward(s, dir), 0.6 * d))
}

fn quick_out(s: Point, d: f64, dir: Option<RouteDirection>) -> RouteShape {
    straight(s.offset(0.1 * outward(s, dir), 0.5 * d))
}

fn corner(s: Point, d: f64, dir: Option<RouteDirection>) -> RouteShape {
    curved(s.offset(0.15 * outward(s, dir), d), Point::new(s.x, s.y + 0.5 * d))
}

fn post(s: Point, d: f64, _dir: Option<RouteDirection>) -> RouteShape {
    curved(Point::new(0.5, s.y + d), Point::new(s.x, s.y + 0.5 * d))
}

fn crosser(s: Point, d: f64, dir: Option<RouteDirection>) -> RouteShape {
    curved(s.offset(0.2 * inward(s, dir), d), Point::new(s.x, s.y + d))
}

fn settle(s: Point, d: f64, _dir: Option<RouteDirection>) -> RouteShape {
    straight(s.offset(0.0, d))
}

fn flat(s: Point, d: f64, dir: Option<RouteDirection>) -> RouteShape {
    straight(s.offset(0.12 * outward(s, dir), 0.3 * d))
}

fn wheel(s: Point, d: f64, dir: Option<RouteDirection>) -> RouteShape {
    let o = outward(s, dir);
    curved(s.offset(0.15 * o, d), Point::new(s.x + 0.1 * o, s.y + 0.3 * d))
}

fn out_and_up(s: Point, d: f64, dir: Option<RouteDirection>) -> RouteShape {
    let o = outward(s, dir);
    curved(s.offset(0.08 * o, d), Point::new(s.x + 0.12 * o, s.y + 0.3 * d))
}

fn texas(s: Point, d: f64, dir: Option<RouteDirection>) -> RouteShape {
    let i = inward(s, dir);
    // break out first, then back across
    curved(s.offset(0.1 * i, 0.6 * d), Point::new(s.x - 0.05 * i, s.y + 0.2 * d))
}

fn whip(s: Point, d: f64, dir: Option<RouteDirection>) -> RouteShape {
    let o = outward(s, dir);
    curved(s.offset(0.08 * o, 0.7 * d), Point::new(s.x - 0.05 * o, s.y + 0.5 * d))
}

fn screen(s: Point, d: f64, dir: Option<RouteDirection>) -> RouteShape {
    straight(s.offset(0.08 * outward(s, dir), 0.2 * d))
}

fn seam(s: Point, d: f64, dir: Option<RouteDirection>) -> RouteShape {
    straight(s.offset(0.03 * inward(s, dir), d))
}

fn go(s: Point, d: f64, _dir: Option<RouteDirection>) -> RouteShape {
    straight(s.offset(0.0, d))
}

const STANDARD_RULES: &[(&[&str], RouteRule)] = &[
    (&["slant"], slant),
    (&["out", "speed_out"], out),
    (&["quick_out"], quick_out),
    (&["corner"], corner),
    (&["post", "skinny_post"], post),
    (&["dig", "in", "cross", "shallow", "china", "scissor"], crosser),
    (&["curl", "hitch", "stick", "snag", "comeback"], settle),
    (&["flat", "arrow", "swing", "flare"], flat),
    (&["wheel", "follow"], wheel),
    (&["out_and_up"], out_and_up),
    (&["texas", "angle"], texas),
    (&["whip"], whip),
    (&["bubble", "tunnel", "screen", "slip"], screen),
    (&["seam", "divide"], seam),
    (&["go"], go),
];

static STANDARD: Lazy<RouteRegistry> = Lazy::new(RouteRegistry::new);

/// Pattern name -> geometry rule
#[derive(Debug, Clone)]
pub struct RouteRegistry {
    rules: HashMap<String, RouteRule>,
}

impl Default for RouteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteRegistry {
    /// Registry with every standard pattern
    pub fn new() -> Self {
        let mut rules = HashMap::new();
        for (names, rule) in STANDARD_RULES {
            for name in *names {
                rules.insert((*name).to_string(), *rule);
            }
        }
        Self { rules }
    }

    /// Shared standard registry
    pub fn standard() -> &'static RouteRegistry {
        &STANDARD
    }

    /// Add or replace a pattern
    pub fn register(&mut self, pattern: impl Into<String>, rule: RouteRule) {
        self.rules.insert(pattern.into().to_ascii_lowercase(), rule);
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.rules.contains_key(&pattern.to_ascii_lowercase())
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Clamped geometry for `pattern` from `start` at normalized depth `depth`
    pub fn shape(
        &self,
        pattern: &str,
        start: Point,
        depth: f64,
        direction: Option<RouteDirection>,
    ) -> RouteShape {
        let rule = match self.rules.get(&pattern.to_ascii_lowercase()) {
            Some(rule) => *rule,
            None => {
                tracing::debug!(pattern, "unknown route pattern, drawing a go");
                go as RouteRule
            }
        };
        let raw = rule(start, depth, direction);
        RouteShape { end: raw.end.clamped(), control: raw.control.map(Point::clamped) }
    }
}
