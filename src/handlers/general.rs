use crate::state::AppState;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use serde_json::json;

/// Root handler — returns an HTML landing page with project info and links
pub async fn root_handler() -> impl IntoResponse {
    Html(r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0"/>
  <title>ERP Payroll API</title>
  <style>
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body { font-family: 'Segoe UI', system-ui, sans-serif; background: #0f172a; color: #e2e8f0; min-height: 100vh; padding: 40px 20px; }
    .container { max-width: 760px; margin: 0 auto; }
    header { text-align: center; margin-bottom: 40px; }
    header h1 { font-size: 2.4rem; font-weight: 800; background: linear-gradient(135deg, #3b82f6, #8b5cf6); -webkit-background-clip: text; -webkit-text-fill-color: transparent; margin-bottom: 8px; }
    header p { color: #94a3b8; font-size: 1.05rem; }
    .routes { background: #1e293b; border: 1px solid #334155; border-radius: 12px; padding: 24px; }
    .routes h2 { font-size: 1.1rem; font-weight: 700; color: #f1f5f9; margin-bottom: 16px; }
    .route-item { display: flex; align-items: flex-start; gap: 12px; padding: 8px 0; border-bottom: 1px solid #0f172a; }
    .route-item:last-child { border-bottom: none; }
    .method { font-size: 0.7rem; font-weight: 700; padding: 2px 8px; border-radius: 4px; min-width: 52px; text-align: center; font-family: monospace; }
    .get { background: #064e3b; color: #34d399; }
    .post { background: #1e3a5f; color: #60a5fa; }
    .route-path { font-family: monospace; font-size: 0.85rem; color: #e2e8f0; flex: 1; }
    .route-desc { font-size: 0.8rem; color: #64748b; }
    footer { text-align: center; margin-top: 32px; color: #475569; font-size: 0.85rem; }
    footer a { color: #38bdf8; text-decoration: none; }
  </style>
</head>
<body>
<div class="container">
  <header>
    <h1>ERP Payroll API</h1>
    <p>Attendance-driven salary calculation, approval and payment for the ERP's HR module</p>
  </header>

  <div class="routes">
    <h2>Routes</h2>
    <div class="route-item"><span class="method post">POST</span><span class="route-path">/api/v1/account/login</span><span class="route-desc">Login and get a JWT token</span></div>
    <div class="route-item"><span class="method get">GET</span><span class="route-path">/api/v1/account/me</span><span class="route-desc">Current user profile</span></div>
    <div class="route-item"><span class="method post">POST</span><span class="route-path">/api/v1/payroll/calculate</span><span class="route-desc">Calculate salaries for a month</span></div>
    <div class="route-item"><span class="method get">GET</span><span class="route-path">/api/v1/payroll/salaries?month=YYYY-MM</span><span class="route-desc">List a month's salary records</span></div>
    <div class="route-item"><span class="method get">GET</span><span class="route-path">/api/v1/payroll/salaries/:id</span><span class="route-desc">Get a salary record</span></div>
    <div class="route-item"><span class="method post">POST</span><span class="route-path">/api/v1/payroll/salaries/:id/approve</span><span class="route-desc">Approve a calculated salary</span></div>
    <div class="route-item"><span class="method post">POST</span><span class="route-path">/api/v1/payroll/salaries/:id/pay</span><span class="route-desc">Pay an approved salary</span></div>
  </div>

  <footer>
    <p><a href="/docs">Swagger UI</a> · <a href="/health">Health</a></p>
  </footer>
</div>
</body>
</html>"#)
}

/// Health check endpoint
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    match sqlx::query("SELECT 1").fetch_one(&state.db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "connected",
                "service": "erp-payroll",
                "version": "0.1.0"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "database": "disconnected",
                "error": e.to_string()
            })),
        ),
    }
}
