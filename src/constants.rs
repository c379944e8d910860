pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Terminal columns drawn per block, so blocks look square
pub const BLOCK_CHARS: u16 = 2;

pub const LINE_SCORE: u32 = 10; // Points per cleared row, no multi-line bonus

// Timing defaults (milliseconds / frames per second)
pub const DEFAULT_GRAVITY_MS: u64 = 500;
pub const DEFAULT_FPS: u32 = 60;
