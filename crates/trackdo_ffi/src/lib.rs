//! Flutter bridge surface for the TrackYourDo core.

pub mod api;
