mod scanner;

pub use scanner::WalkdirFileScanner;
