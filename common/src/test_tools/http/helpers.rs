use lambda_http::aws_lambda_events::apigw::ApiGatewayProxyRequestContext;
use lambda_http::request::RequestContext;
use lambda_http::{Body, Request, RequestExt};
use std::collections::HashMap;

pub fn build_request(body: Body) -> Request {
    let request_context = RequestContext::ApiGatewayV1(ApiGatewayProxyRequestContext::default());
    Request::new(body).with_request_context(request_context)
}

pub fn build_request_with_path_params(body: Body, params: HashMap<String, String>) -> Request {
    build_request(body).with_path_parameters(params)
}
