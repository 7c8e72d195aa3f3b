//! AWS serverless API blueprint.
//!
//! A DynamoDB-backed CRUD API: one table, an IAM policy scoped to it, two
//! lambda functions (CRUD backend and request authorizer) with their roles,
//! an HTTP API with a custom authorizer, invoke permissions, a shared proxy
//! integration, one route per entry in [`ROUTE_KEYS`], and an auto-deployed
//! stage named after the stack.

use serde_json::json;
use tracing::debug;

use super::Blueprint;
use crate::error::Result;
use crate::graph::ResourceGraph;
use crate::naming::derive_route_names;
use crate::resource::{Asset, AttrValue, Declaration};
use crate::stack::StackContext;
use crate::tags::TagSet;

/// Route keys served by the API. Each maps to one route declaration named by
/// sanitizing the key.
pub const ROUTE_KEYS: [&str; 4] = [
    "GET /items",
    "PUT /items",
    "GET /items/{id}",
    "DELETE /items/{id}",
];

const BASIC_EXECUTION_ROLE_ARN: &str =
    "arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole";

/// Trust policy letting the Lambda service assume a role.
fn lambda_assume_role_policy() -> AttrValue {
    json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Action": "sts:AssumeRole",
            "Effect": "Allow",
            "Sid": "",
            "Principal": { "Service": "lambda.amazonaws.com" },
        }],
    })
    .into()
}

/// The AWS serverless API blueprint.
pub struct AwsServerlessApi;

impl Blueprint for AwsServerlessApi {
    fn name(&self) -> &'static str {
        "aws-serverless-api"
    }

    fn description(&self) -> &'static str {
        "DynamoDB-backed HTTP API with a custom lambda authorizer"
    }

    fn build(&self, ctx: &StackContext) -> Result<ResourceGraph> {
        debug!(stack = ctx.stack(), "building aws-serverless-api");
        let mut graph = ResourceGraph::new();
        let tags = TagSet::new(ctx, ctx.get_or("team", "DA"));

        let table = graph.insert(
            Declaration::new("itemsTable", "aws:dynamodb:Table")
                .attr("attributes", json!([{ "name": "id", "type": "S" }]))
                .attr("hash_key", "id")
                .attr("read_capacity", 1i64)
                .attr("write_capacity", 1i64)
                .tagged(tags.clone()),
        )?;

        let table_policy = graph.insert(
            Declaration::new("itemsTableIamPolicy", "aws:iam:Policy")
                .attr(
                    "description",
                    "Grants the CRUD function access to the items table",
                )
                .attr(
                    "policy",
                    AttrValue::object([
                        ("Version", "2012-10-17".into()),
                        (
                            "Statement",
                            AttrValue::array(vec![AttrValue::object([
                                ("Effect", "Allow".into()),
                                (
                                    "Action",
                                    json!([
                                        "dynamodb:DeleteItem",
                                        "dynamodb:GetItem",
                                        "dynamodb:PutItem",
                                        "dynamodb:Scan",
                                        "dynamodb:UpdateItem",
                                    ])
                                    .into(),
                                ),
                                ("Resource", table.output("arn")),
                            ])]),
                        ),
                    ]),
                )
                .tagged(tags.clone()),
        )?;

        let crud_role = graph.insert(
            Declaration::new("dynamoDbCrudLambdaRole", "aws:iam:Role")
                .attr("assume_role_policy", lambda_assume_role_policy())
                .attr(
                    "managed_policy_arns",
                    AttrValue::array(vec![
                        BASIC_EXECUTION_ROLE_ARN.into(),
                        table_policy.output("arn"),
                    ]),
                )
                .tagged(tags.clone()),
        )?;

        let crud_lambda = graph.insert(
            Declaration::new("dynamoDbCrudLambda", "aws:lambda:Function")
                .attr("role", crud_role.output("arn"))
                .attr("handler", "index.handler")
                .attr("runtime", "nodejs18.x")
                .attr("code", Asset::archive("functions/dynamodb-crud"))
                .attr(
                    "environment",
                    AttrValue::object([(
                        "variables",
                        AttrValue::object([("DYNAMODB_TABLE", table.output("name"))]),
                    )]),
                )
                .tagged(tags.clone()),
        )?;

        let authorizer_role = graph.insert(
            Declaration::new("apiAuthorizerRole", "aws:iam:Role")
                .attr("assume_role_policy", lambda_assume_role_policy())
                .attr(
                    "managed_policy_arns",
                    AttrValue::array(vec![BASIC_EXECUTION_ROLE_ARN.into()]),
                )
                .tagged(tags.clone()),
        )?;

        let authorizer_lambda = graph.insert(
            Declaration::new("apiAuthorizerLambda", "aws:lambda:Function")
                .attr("role", authorizer_role.output("arn"))
                .attr("handler", "index.handler")
                .attr("runtime", "nodejs18.x")
                .attr("code", Asset::archive("functions/authorizer"))
                .tagged(tags.clone()),
        )?;

        let api = graph.insert(
            Declaration::new("publicHttpApi", "aws:apigatewayv2:Api")
                .attr("protocol_type", "HTTP")
                .attr("description", "Public HTTP API fronting the CRUD function")
                .tagged(tags.clone()),
        )?;

        let authorizer = graph.insert(
            Declaration::new("publicHttpApiAuthorizer", "aws:apigatewayv2:Authorizer")
                .attr("api_id", api.output("id"))
                .attr("authorizer_type", "REQUEST")
                .attr("authorizer_uri", authorizer_lambda.output("invoke_arn"))
                .attr(
                    "identity_sources",
                    json!(["$request.header.authorizationToken"]),
                )
                .attr("authorizer_payload_format_version", "1.0")
                .attr("authorizer_result_ttl_in_seconds", 0i64),
        )?;

        graph.insert(
            Declaration::new("dynamoDbCrudLambdaPermissions", "aws:lambda:Permission")
                .attr("action", "lambda:InvokeFunction")
                .attr("principal", "apigateway.amazonaws.com")
                .attr("function", crud_lambda.output("arn"))
                .attr(
                    "source_arn",
                    AttrValue::concat(vec![api.output("execution_arn"), "/*/*".into()]),
                )
                .depends_on(&api)
                .depends_on(&crud_lambda),
        )?;

        graph.insert(
            Declaration::new("apiAuthorizerLambdaPermissions", "aws:lambda:Permission")
                .attr("action", "lambda:InvokeFunction")
                .attr("principal", "apigateway.amazonaws.com")
                .attr("function", authorizer_lambda.output("arn"))
                .attr(
                    "source_arn",
                    AttrValue::concat(vec![
                        api.output("execution_arn"),
                        "/authorizers/".into(),
                        authorizer.output("id"),
                    ]),
                )
                .depends_on(&api)
                .depends_on(&authorizer_lambda)
                .depends_on(&authorizer),
        )?;

        let integration = graph.insert(
            Declaration::new("publicHttpApiIntegration", "aws:apigatewayv2:Integration")
                .attr("api_id", api.output("id"))
                .attr("description", "Shared proxy integration for the CRUD function")
                .attr("integration_type", "AWS_PROXY")
                .attr("integration_uri", crud_lambda.output("invoke_arn"))
                .attr("payload_format_version", "1.0"),
        )?;

        // One route per key; identifier collisions abort the build before
        // any route is declared.
        let route_names = derive_route_names(&ROUTE_KEYS)?;
        let mut routes = Vec::with_capacity(route_names.len());
        for (route_name, route_key) in route_names.into_iter().zip(ROUTE_KEYS) {
            let route = graph.insert(
                Declaration::new(route_name, "aws:apigatewayv2:Route")
                    .attr("api_id", api.output("id"))
                    .attr("route_key", route_key)
                    .attr("authorization_type", "CUSTOM")
                    .attr("authorizer_id", authorizer.output("id"))
                    .attr(
                        "target",
                        AttrValue::concat(vec![
                            "integrations/".into(),
                            integration.output("id"),
                        ]),
                    )
                    .depends_on(&api)
                    .depends_on(&integration),
            )?;
            routes.push(route);
        }

        let mut stage = Declaration::new("publicHttpApiDefaultStage", "aws:apigatewayv2:Stage")
            .attr("api_id", api.output("id"))
            .attr("name", ctx.stack())
            .attr("auto_deploy", true)
            .tagged(tags);
        for route in &routes {
            stage = stage.depends_on(route);
        }
        let stage = graph.insert(stage)?;

        graph.export("crudFunctionName", crud_lambda.output("name"));
        graph.export("apiEndpoint", stage.output("invoke_url"));

        Ok(graph)
    }
}
