//! Landing screen: project blurb and links to the working screens.

use crate::router::View;

pub const DESCRIPTION: &str = "This project assumes all standard mathematical operations (+, /, *, -) need a lot \
of time to be calculated. Therefore it organizes the work of several machines to calculate given expressions as \
fast as possible.";

/// Screens reachable from the home page, in display order.
pub const LINKS: [View; 4] = [View::InputExpression, View::ViewExpressions, View::Operations, View::ComputingPowers];
