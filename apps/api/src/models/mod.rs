// Post, comment and vote rows are only materialised by the in-memory store;
// production code writes them through `store::postgres` and reads aggregates.
#[cfg(test)]
pub mod post;
pub mod tag;
