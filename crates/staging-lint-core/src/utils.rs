//! Text-analysis helpers shared by the analyzer and rule implementations.

pub mod blocks;
pub mod directives;
pub mod model_config;
pub mod pattern;
pub mod region;

#[doc(inline)]
pub use blocks::{find_blocks, BlockEntry, REQUIRED_BLOCKS};
#[doc(inline)]
pub use directives::strip_directives;
#[doc(inline)]
pub use model_config::{extract_config, extract_tags, ConfigMetadata};
#[doc(inline)]
pub use region::{isolate_block, select_list};
