// Session access for GraphQL resolvers.
//
// The /gql route reads the same forwarded headers as the REST routes and attaches
// the principal to the request data. Resolvers pick the role they need from here.

use async_graphql::{Context, Error, Result as GqlResult};

use crate::modules::accounts::core::principal::Principal;
use crate::modules::accounts::core::user::Role;

pub fn session<'a>(context: &Context<'a>) -> GqlResult<&'a Principal> {
    context
        .data_opt::<Principal>()
        .ok_or_else(|| Error::new("Unauthorized"))
}

pub fn session_with_role<'a>(context: &Context<'a>, role: Role) -> GqlResult<&'a Principal> {
    let principal = session(context)?;
    if principal.has_role(role) {
        Ok(principal)
    } else {
        Err(Error::new("Unauthorized"))
    }
}
