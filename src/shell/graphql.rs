use async_graphql::{EmptySubscription, MergedObject, Schema};

use crate::modules::notifications::adapters::inbound::graphql::{
    NotificationsMutation, NotificationsQuery,
};
use crate::modules::payments::adapters::inbound::graphql::{PaymentsMutation, PaymentsQuery};
use crate::shell::state::AppState;

#[derive(MergedObject, Default)]
pub struct QueryRoot(PaymentsQuery, NotificationsQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(PaymentsMutation, NotificationsMutation);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(state)
        .finish()
}
