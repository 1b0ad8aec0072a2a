mod normalize;
mod resolver;

pub use normalize::{LyricsHeaderRule, NormalizationRule, SectionMarkerRule, TextNormalizer};
pub use resolver::LyricsResolver;
