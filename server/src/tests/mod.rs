mod common;
mod content_api_test;
mod locale_routing_test;
