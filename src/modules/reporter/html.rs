use super::models::UninstallSummary;
use crate::modules::cleaner::models::{RemovalOutcome, StepReport};
use crate::modules::common::utils;

/// 生成 HTML 报告
pub fn generate_html_report(summary: &UninstallSummary) -> String {
    format!(r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>卸载报告 - {}</title>
    <style>
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: "Segoe UI", "Microsoft YaHei", sans-serif;
            background: #eef1f5;
            padding: 20px;
        }}
        .container {{
            max-width: 900px;
            margin: 0 auto;
            background: white;
            border-radius: 12px;
            box-shadow: 0 10px 30px rgba(0,0,0,0.15);
            overflow: hidden;
        }}
        .header {{
            background: #2c3e50;
            color: white;
            padding: 30px;
        }}
        .header h1 {{ font-size: 26px; margin-bottom: 10px; }}
        .header .meta {{ opacity: 0.8; font-size: 14px; }}
        .summary {{
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
            gap: 20px;
            padding: 30px;
            background: #f8f9fa;
        }}
        .stat {{
            background: white;
            padding: 20px;
            border-radius: 10px;
            text-align: center;
            box-shadow: 0 2px 8px rgba(0,0,0,0.08);
        }}
        .stat .value {{ font-size: 30px; font-weight: bold; color: #34495e; }}
        .stat .label {{ color: #666; margin-top: 8px; font-size: 14px; }}
        .success .value {{ color: #27ae60; }}
        .warning .value {{ color: #e67e22; }}
        .content {{ padding: 30px; }}
        table {{ width: 100%; border-collapse: collapse; }}
        th, td {{ padding: 12px 15px; text-align: left; border-bottom: 1px solid #eee; }}
        th {{ background: #f8f9fa; color: #2c3e50; font-weight: 600; }}
        .status {{
            display: inline-block;
            padding: 4px 12px;
            border-radius: 20px;
            font-size: 12px;
            font-weight: 600;
        }}
        .status.success {{ background: #d4edda; color: #155724; }}
        .status.skipped {{ background: #e9ecef; color: #495057; }}
        .status.warning {{ background: #fff3cd; color: #856404; }}
        .error {{ font-family: "Consolas", monospace; font-size: 12px; color: #a94442; word-break: break-all; }}
        .footer {{ background: #f8f9fa; padding: 20px 30px; text-align: center; color: #666; font-size: 13px; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>卸载报告</h1>
            <div class="meta">
                <p>服务: <strong>{}</strong></p>
                <p>安装目录: {}</p>
                <p>生成时间: {}</p>
                <p>报告ID: {}</p>
            </div>
        </div>

        <div class="summary">
            <div class="stat success">
                <div class="value">{}</div>
                <div class="label">成功</div>
            </div>
            <div class="stat">
                <div class="value">{}</div>
                <div class="label">跳过</div>
            </div>
            <div class="stat warning">
                <div class="value">{}</div>
                <div class="label">警告</div>
            </div>
            <div class="stat">
                <div class="value">{}</div>
                <div class="label">释放空间</div>
            </div>
        </div>

        <div class="content">
            {}
        </div>

        <div class="footer">
            <p>由 FastSearch 卸载工具生成</p>
        </div>
    </div>
</body>
</html>"#,
        escape_html(&summary.service_name),
        escape_html(&summary.service_name),
        escape_html(&summary.install_dir),
        summary.generated_at.format("%Y-%m-%d %H:%M:%S"),
        summary.id,
        summary.count(RemovalOutcome::Success),
        summary.count(RemovalOutcome::Skipped),
        summary.count(RemovalOutcome::Warning),
        utils::format_size(summary.total_bytes_freed()),
        generate_steps_table(&summary.steps),
    )
}

fn generate_steps_table(steps: &[StepReport]) -> String {
    if steps.is_empty() {
        return "<p>没有执行任何步骤</p>".to_string();
    }

    let mut html = String::from(r#"
        <table>
            <thead>
                <tr>
                    <th>步骤</th>
                    <th>结果</th>
                    <th>说明</th>
                </tr>
            </thead>
            <tbody>
    "#);

    for report in steps {
        let status_html = match report.outcome {
            RemovalOutcome::Success => r#"<span class="status success">成功</span>"#,
            RemovalOutcome::Skipped => r#"<span class="status skipped">跳过</span>"#,
            RemovalOutcome::Warning => r#"<span class="status warning">警告</span>"#,
        };

        let error_html = report
            .error
            .as_deref()
            .map(|e| format!(r#"<div class="error">{}</div>"#, escape_html(e)))
            .unwrap_or_default();

        html.push_str(&format!(r#"
                <tr>
                    <td>{}</td>
                    <td>{}</td>
                    <td>{}{}</td>
                </tr>
        "#,
            report.step,
            status_html,
            escape_html(&report.detail),
            error_html,
        ));
    }

    html.push_str("</tbody></table>");

    html
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::cleaner::models::Step;

    #[test]
    fn report_lists_steps_and_escapes_text() {
        let mut summary = UninstallSummary::new("FastSearchService".to_string(), r"C:\FastSearch".to_string());
        summary.push(StepReport::warning(Step::Directory, "删除安装目录失败", "<locked>"));

        let html = generate_html_report(&summary);

        assert!(html.contains("FastSearchService"));
        assert!(html.contains("安装目录"));
        assert!(html.contains("&lt;locked&gt;"));
        assert!(!html.contains("<locked>"));
    }
}
