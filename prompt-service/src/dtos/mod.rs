pub mod generation;

pub use generation::{
    ExcuseRequest, ExcuseResponse, ReverseCancelRequest, ReverseCancelResponse, StylesResponse,
    TimelineEvent, TimelineRequest, TimelineResponse, UnsummaryRequest, UnsummaryResponse,
};
