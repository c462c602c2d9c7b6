// Page contract: element ids, selectors and class/variable names the page's
// markup and stylesheet agree on.

pub const YEAR_ID: &str = "year";
pub const CANVAS_ID: &str = "bg-canvas";

pub const REVEAL_SELECTOR: &str = ".card, .glide__card, .timeline__item";
pub const REVEAL_HIDDEN_CLASS: &str = "card--hidden";
pub const REVEAL_VISIBLE_CLASS: &str = "card--visible";

pub const POINTER_X_VAR: &str = "--pointer-x";
pub const POINTER_Y_VAR: &str = "--pointer-y";

/// Window events after which element positions are measured again.
pub const RECHECK_EVENTS: [&str; 2] = ["scroll", "resize"];
