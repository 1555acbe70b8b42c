/*!
 * 可选 JWT 身份中间件
 *
 * 解析 `Authorization: Bearer <JWT_TOKEN>`，把调用方身份放进请求扩展中，
 * 供后续处理程序读取（例如投票的 `created_by`、成绩历史的修改人）。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::OptionalJWT;
 *
 * App::new().service(
 *     web::scope("/api/v1/votes")
 *         .wrap(OptionalJWT)
 *         .route("", web::post().to(create_vote)),
 * );
 *
 * async fn create_vote(req: HttpRequest) -> ActixResult<HttpResponse> {
 *     let created_by = OptionalJWT::extract_user_id(&req);
 *     // ...
 * }
 * ```
 *
 * ## 认证流程
 *
 * 1. 没有 `Authorization` 头：匿名请求，直接放行
 * 2. 令牌有效：将 [`Caller`] 存入请求扩展，继续处理请求
 * 3. 头存在但令牌无效或过期：返回 401
 *
 * 令牌的签发不在本服务内，只负责校验。密钥来自配置 `jwt.secret`（或环境变量 `JWT_SECRET`）。
 */

use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{AUTHORIZATION, CONTENT_TYPE},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, info};

const BEARER_PREFIX: &str = "Bearer ";

/// 已认证的调用方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: i64,
    pub role: UserRole,
}

#[derive(Clone)]
pub struct OptionalJWT;

fn unauthorized(message: &str) -> HttpResponse {
    HttpResponse::Unauthorized()
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::Unauthorized,
            message,
        ))
}

// 辅助函数：解析调用方身份，没有 Authorization 头时返回 Ok(None)
fn resolve_caller(req: &ServiceRequest) -> Result<Option<Caller>, String> {
    let Some(header) = req.headers().get(AUTHORIZATION) else {
        return Ok(None);
    };

    let token = header
        .to_str()
        .ok()
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| "Invalid Authorization header".to_string())?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid JWT token".to_string()
    })?;

    let user_id = claims
        .user_id()
        .ok_or_else(|| "Invalid user ID in JWT".to_string())?;
    let role = claims
        .role
        .parse::<UserRole>()
        .map_err(|_| "Invalid role in JWT".to_string())?;

    Ok(Some(Caller { user_id, role }))
}

impl<S, B> Transform<S, ServiceRequest> for OptionalJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = OptionalJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(OptionalJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct OptionalJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for OptionalJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            match resolve_caller(&req) {
                Ok(caller) => {
                    if let Some(caller) = caller {
                        debug!("Request authenticated for user ID: {}", caller.user_id);
                        req.extensions_mut().insert(caller);
                    }
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        unauthorized(&format!("Unauthorized: {err}")).map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取调用方信息
impl OptionalJWT {
    /// 从请求扩展中提取调用方，匿名请求返回 None
    pub fn extract_caller(req: &actix_web::HttpRequest) -> Option<Caller> {
        req.extensions().get::<Caller>().copied()
    }

    /// 从请求扩展中提取用户ID
    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        Self::extract_caller(req).map(|caller| caller.user_id)
    }
}
