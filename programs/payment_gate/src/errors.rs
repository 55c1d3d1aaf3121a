use anchor_lang::prelude::*;

#[error_code]
pub enum GateError {
    #[msg("flow rate must be greater than zero")]
    ZeroFlowRate,

    #[msg("gate name cannot be empty")]
    EmptyGateName,

    #[msg("gate name too long")]
    GateNameTooLong,

    #[msg("merchant already has a gate with this name")]
    DuplicateGateName,

    #[msg("gate does not exist")]
    NonexistentGate,

    #[msg("cannot rename gate belonging to another merchant")]
    RenameForeignGate,

    #[msg("cannot delete gate belonging to another merchant")]
    DeleteForeignGate,

    #[msg("cannot delete nonexistant gate")]
    DeleteNonexistentGate,

    #[msg("already checked in at this gate")]
    AlreadyCheckedIn,

    #[msg("not checked in at this gate")]
    NotCheckedIn,

    #[msg("existing flow rate conflicts with the gate rate")]
    ConflictingFlow,

    #[msg("gate has reached its active user limit")]
    GateFull,

    #[msg("aggregate flow rate overflow")]
    RateOverflow,

    #[msg("gate id does not match the registry counter")]
    StaleGateId,

    #[msg("flow already exists for this sender")]
    FlowAlreadyExists,

    #[msg("flow does not exist")]
    FlowNotFound,

    #[msg("missing flow account for an active user")]
    MissingFlowAccount,
}
