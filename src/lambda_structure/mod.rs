pub mod http_lambda_main;
