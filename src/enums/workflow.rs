/// The classified unit of work derived from trigger mode + event payload.
///
/// Comment workflows always carry a command: the skip check has already
/// filtered out bodies without the trigger mention, and a bare mention
/// defaults to `analyze`. Unrecognized command strings pass through
/// verbatim; the runner turns them into an error comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Workflow {
    Comment {
        number: u64,
        is_pull_request: bool,
        command: String,
    },
    PrAutomatic {
        pr_number: u64,
    },
    ManualRepository,
}
