/// A distributor marking one of their records as paid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletePayment {
    pub record_id: String,
    pub distributor_id: String,
    /// Profile forwarded with the session, used when the directory has no entry.
    pub distributor_name: Option<String>,
    pub distributor_email: Option<String>,
}
