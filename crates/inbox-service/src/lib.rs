//! # inbox-service
//!
//! Application layer: submission intake, inbox and trash views, and the
//! soft-delete lifecycle, plus the request/response DTOs the API speaks.

pub mod dto;
pub mod services;

pub use dto::{
    HealthChecks, HealthResponse, MessageResponse, ReadinessResponse, SoftDeleteRequest,
    StatsResponse, SubmitMessageRequest,
};
pub use services::{
    resolve_attribution, HealthService, MessageService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, SubmissionSchema,
};
