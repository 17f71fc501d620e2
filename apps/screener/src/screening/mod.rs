// Resume screening: text extraction, profile scraping, batch scoring and ranking.
// Handlers own the HTTP surface; everything else here is synchronous.

pub mod extract;
pub mod handlers;
pub mod pipeline;
pub mod profile;
