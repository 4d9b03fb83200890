/// Constants used throughout clipdesk
/// This module centralizes fixed tables and file names

/// File extensions accepted by the uploader
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4",
    "mov",
    "m4v",
    "webm",
    "mkv",
    "avi",
];

/// The three desk accounts: (id, name, email, role)
pub const DIRECTORY: &[(&str, &str, &str, &str)] = &[
    ("u-1", "Avery Admin", "admin@clipdesk.dev", "admin"),
    ("u-2", "Casey Client", "client@clipdesk.dev", "client"),
    ("u-3", "Frankie Freelancer", "freelancer@clipdesk.dev", "freelancer"),
];

/// Separators that end the series prefix of a video title
/// e.g. "Kitchen Remodel - Demo Day" or "Kitchen Remodel: Tiles"
pub const TITLE_SEPARATORS: &[&str] = &[
    " - ",
    ": ",
    " | ",
    " — ",
    " #",
];

/// Trailing words that mark an installment, stripped from the series prefix
/// when followed by a number ("Podcast Ep 4" groups with "Podcast Ep 5")
pub const INSTALLMENT_MARKERS: &[&str] = &[
    "part",
    "pt",
    "pt.",
    "ep",
    "ep.",
    "episode",
];

/// Session mirror inside the data directory
pub const SESSION_FILE: &str = "session.json";

/// Video mirror inside the data directory
pub const VIDEOS_FILE: &str = "videos.json";

/// Generator rotation positions inside the data directory
pub const GENERATOR_FILE: &str = "generator.json";

/// Date format used for every date on the command line and in exports
pub const DATE_FORMAT: &str = "%Y-%m-%d";
