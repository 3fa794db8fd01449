pub mod chat_query_route;
pub mod chat_request;
pub mod chat_response;
