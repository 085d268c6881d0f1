// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::{
    application::dto::analytics_request::{
        CrawlSelectionQuery, MobileIssuesQuery, MobilePageQuery, TopNQuery, TrendQuery,
    },
    config::settings::{AnalyticsSettings, UrlNormalizationSettings},
    domain::{
        models::{
            analytics::{
                CrawlOverview, IssueTypeBreakdown, ProblemPage, ResponseTimeStats,
                StatusCodeCount, TopIssue, WebVitalsSummary,
            },
            compliance::{AccessibilityReport, MobileIssuesPage, MobilePageResult, MobileSummary},
            crawl::{Crawl, CrawlStatus, CrawlSummary},
            diff::CrawlDiff,
            issue::Issue,
            page::Page,
            trend::ProjectTrend,
        },
        repositories::{
            crawl_repository::{CrawlRepository, RepositoryError},
            issue_repository::IssueRepository,
            page_repository::PageRepository,
        },
        services::{
            accessibility_scorer,
            diff_engine::{self, CrawlData, DiffOptions},
            metrics_aggregator, mobile_scorer, sitemap, trend_analyzer, web_vitals,
        },
    },
    utils::url_utils::normalize_url,
};
use metrics::{counter, histogram};
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Crawl not found")]
    CrawlNotFound,
    #[error("Project not found")]
    ProjectNotFound,
    #[error("Page not found: {0}")]
    PageNotFound(String),
    #[error("Crawl {crawl_id} is not completed yet (status: {status})")]
    NotReady { crawl_id: Uuid, status: CrawlStatus },
    #[error("Crawls {crawl_a} and {crawl_b} belong to different projects")]
    CrossProjectMismatch { crawl_a: Uuid, crawl_b: Uuid },
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl AnalyticsError {
    /// 指标中使用的结果标签
    pub fn outcome(&self) -> &'static str {
        match self {
            AnalyticsError::CrawlNotFound
            | AnalyticsError::ProjectNotFound
            | AnalyticsError::PageNotFound(_) => "not_found",
            AnalyticsError::NotReady { .. } => "not_ready",
            AnalyticsError::CrossProjectMismatch { .. } => "mismatch",
            AnalyticsError::Validation(_) => "invalid",
            AnalyticsError::Repository(_) => "error",
        }
    }
}

/// 记录请求计数与耗时
async fn observe<T, F>(operation: &'static str, fut: F) -> Result<T, AnalyticsError>
where
    F: Future<Output = Result<T, AnalyticsError>>,
{
    let started = Instant::now();
    let result = fut.await;
    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.outcome(),
    };
    counter!("analytics_requests_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
    histogram!("analytics_request_duration_seconds", "operation" => operation)
        .record(started.elapsed().as_secs_f64());
    result
}

/// 分析门面
///
/// 无状态：每次请求通过仓库加载数据，交给领域服务计算后返回，不写入任何数据。
pub struct AnalyticsUseCase<CR, PR, IR> {
    crawl_repo: Arc<CR>,
    page_repo: Arc<PR>,
    issue_repo: Arc<IR>,
    settings: AnalyticsSettings,
    normalization: UrlNormalizationSettings,
}

impl<CR, PR, IR> AnalyticsUseCase<CR, PR, IR>
where
    CR: CrawlRepository + 'static,
    PR: PageRepository + 'static,
    IR: IssueRepository + 'static,
{
    pub fn new(
        crawl_repo: Arc<CR>,
        page_repo: Arc<PR>,
        issue_repo: Arc<IR>,
        settings: AnalyticsSettings,
        normalization: UrlNormalizationSettings,
    ) -> Self {
        Self {
            crawl_repo,
            page_repo,
            issue_repo,
            settings,
            normalization,
        }
    }

    pub async fn overview(&self, crawl_id: Uuid) -> Result<CrawlOverview, AnalyticsError> {
        observe("overview", async {
            let crawl = self.load_completed(crawl_id).await?;
            let (pages, issues) = self.load_pages_and_issues(crawl_id).await?;
            Ok(metrics_aggregator::overview(
                &crawl,
                &pages,
                &issues,
                self.settings.slow_page_threshold_secs,
            ))
        })
        .await
    }

    pub async fn response_times(&self, crawl_id: Uuid) -> Result<ResponseTimeStats, AnalyticsError> {
        observe("response_times", async {
            self.load_completed(crawl_id).await?;
            let pages = self.page_repo.find_by_crawl_id(crawl_id).await?;
            Ok(metrics_aggregator::response_time_stats(&pages))
        })
        .await
    }

    pub async fn top_issues(
        &self,
        crawl_id: Uuid,
        query: TopNQuery,
    ) -> Result<Vec<TopIssue>, AnalyticsError> {
        observe("top_issues", async {
            let limit = self.resolve_top_n(&query)?;
            self.load_completed(crawl_id).await?;
            let issues = self.issue_repo.find_by_crawl_id(crawl_id).await?;
            Ok(metrics_aggregator::top_issues(&issues, limit))
        })
        .await
    }

    pub async fn issues_by_type(
        &self,
        crawl_id: Uuid,
    ) -> Result<Vec<IssueTypeBreakdown>, AnalyticsError> {
        observe("issues_by_type", async {
            self.load_completed(crawl_id).await?;
            let issues = self.issue_repo.find_by_crawl_id(crawl_id).await?;
            Ok(metrics_aggregator::issues_by_type(&issues))
        })
        .await
    }

    pub async fn status_codes(&self, crawl_id: Uuid) -> Result<Vec<StatusCodeCount>, AnalyticsError> {
        observe("status_codes", async {
            self.load_completed(crawl_id).await?;
            let pages = self.page_repo.find_by_crawl_id(crawl_id).await?;
            Ok(metrics_aggregator::status_code_breakdown(&pages))
        })
        .await
    }

    pub async fn top_pages(
        &self,
        crawl_id: Uuid,
        query: TopNQuery,
    ) -> Result<Vec<ProblemPage>, AnalyticsError> {
        observe("top_pages", async {
            let limit = self.resolve_top_n(&query)?;
            self.load_completed(crawl_id).await?;
            let (pages, issues) = self.load_pages_and_issues(crawl_id).await?;
            Ok(metrics_aggregator::top_problem_pages(&pages, &issues, limit))
        })
        .await
    }

    pub async fn web_vitals(&self, crawl_id: Uuid) -> Result<WebVitalsSummary, AnalyticsError> {
        observe("web_vitals", async {
            self.load_completed(crawl_id).await?;
            let pages = self.page_repo.find_by_crawl_id(crawl_id).await?;
            Ok(web_vitals::summarize(crawl_id, &pages))
        })
        .await
    }

    pub async fn sitemap(&self, crawl_id: Uuid) -> Result<String, AnalyticsError> {
        observe("sitemap", async {
            self.load_completed(crawl_id).await?;
            let pages = self.page_repo.find_by_crawl_id(crawl_id).await?;
            Ok(sitemap::build_sitemap(&pages))
        })
        .await
    }

    /// 项目无障碍报告
    ///
    /// 未指定爬取时使用最新的已完成爬取；项目还没有已完成爬取时返回占位报告
    pub async fn accessibility(
        &self,
        project_id: Uuid,
        query: CrawlSelectionQuery,
    ) -> Result<AccessibilityReport, AnalyticsError> {
        observe("accessibility", async {
            let Some(crawl) = self.resolve_project_crawl(project_id, query.crawl_id).await? else {
                return Ok(AccessibilityReport::without_crawl(project_id));
            };
            let (pages, issues) = self.load_pages_and_issues(crawl.id).await?;
            Ok(accessibility_scorer::score_accessibility(
                project_id, crawl.id, &pages, &issues,
            ))
        })
        .await
    }

    pub async fn mobile_summary(
        &self,
        project_id: Uuid,
        query: CrawlSelectionQuery,
    ) -> Result<MobileSummary, AnalyticsError> {
        observe("mobile_summary", async {
            let Some(crawl) = self.resolve_project_crawl(project_id, query.crawl_id).await? else {
                return Ok(mobile_scorer::summarize(project_id, None, &[]));
            };
            let pages = self.page_repo.find_by_crawl_id(crawl.id).await?;
            Ok(mobile_scorer::summarize(project_id, Some(crawl.id), &pages))
        })
        .await
    }

    pub async fn mobile_issues(
        &self,
        project_id: Uuid,
        query: MobileIssuesQuery,
    ) -> Result<MobileIssuesPage, AnalyticsError> {
        observe("mobile_issues", async {
            query
                .validate()
                .map_err(|e| AnalyticsError::Validation(e.to_string()))?;
            if let (Some(min), Some(max)) = (query.min_score, query.max_score) {
                if min > max {
                    return Err(AnalyticsError::Validation(
                        "min_score must not exceed max_score".to_string(),
                    ));
                }
            }
            let filter = query.to_filter();
            let Some(crawl) = self.resolve_project_crawl(project_id, query.crawl_id).await? else {
                return Ok(mobile_scorer::list_issues(None, &[], &filter));
            };
            let pages = self.page_repo.find_by_crawl_id(crawl.id).await?;
            Ok(mobile_scorer::list_issues(Some(crawl.id), &pages, &filter))
        })
        .await
    }

    /// 单页移动端评估，URL 先精确匹配，再按规范化后的键匹配
    pub async fn mobile_page(
        &self,
        crawl_id: Uuid,
        query: MobilePageQuery,
    ) -> Result<MobilePageResult, AnalyticsError> {
        observe("mobile_page", async {
            query
                .validate()
                .map_err(|e| AnalyticsError::Validation(e.to_string()))?;
            self.load_completed(crawl_id).await?;
            let pages = self.page_repo.find_by_crawl_id(crawl_id).await?;

            let page = match pages.iter().find(|p| p.url == query.url) {
                Some(page) => page,
                None => {
                    let key = normalize_url(&query.url, &self.normalization);
                    pages
                        .iter()
                        .find(|p| normalize_url(&p.url, &self.normalization) == key)
                        .ok_or_else(|| AnalyticsError::PageNotFound(query.url.clone()))?
                }
            };

            mobile_scorer::evaluate_page(page).ok_or_else(|| {
                AnalyticsError::Validation(format!(
                    "page {} has no mobile check data",
                    page.url
                ))
            })
        })
        .await
    }

    /// 对比同一项目的两次已完成爬取，`crawl_a` 视为基线
    pub async fn compare(&self, crawl_a: Uuid, crawl_b: Uuid) -> Result<CrawlDiff, AnalyticsError> {
        observe("compare", async {
            let (a, b) = tokio::try_join!(
                self.crawl_repo.find_by_id(crawl_a),
                self.crawl_repo.find_by_id(crawl_b)
            )?;
            let a = a.ok_or(AnalyticsError::CrawlNotFound)?;
            let b = b.ok_or(AnalyticsError::CrawlNotFound)?;

            if a.project_id != b.project_id {
                warn!(%crawl_a, %crawl_b, "Rejected comparison across projects");
                return Err(AnalyticsError::CrossProjectMismatch { crawl_a, crawl_b });
            }
            ensure_completed(&a)?;
            ensure_completed(&b)?;

            let ((pages_a, issues_a), (pages_b, issues_b)) = tokio::try_join!(
                self.load_pages_and_issues(crawl_a),
                self.load_pages_and_issues(crawl_b)
            )?;

            let options = DiffOptions {
                normalization: self.normalization.clone(),
                list_limit: self.settings.diff_list_limit,
            };
            let diff = diff_engine::diff_crawls(
                CrawlData {
                    crawl: &a,
                    pages: &pages_a,
                    issues: &issues_a,
                },
                CrawlData {
                    crawl: &b,
                    pages: &pages_b,
                    issues: &issues_b,
                },
                &options,
            );
            info!(
                %crawl_a,
                %crawl_b,
                new_urls = diff.summary.new_urls,
                removed_urls = diff.summary.removed_urls,
                "Compared crawls"
            );
            Ok(diff)
        })
        .await
    }

    pub async fn trend(
        &self,
        project_id: Uuid,
        query: TrendQuery,
    ) -> Result<ProjectTrend, AnalyticsError> {
        observe("trend", async {
            query
                .validate()
                .map_err(|e| AnalyticsError::Validation(e.to_string()))?;
            self.ensure_project(project_id).await?;
            let limit = query.limit.unwrap_or(self.settings.trend_default_limit);
            let crawls = self
                .crawl_repo
                .find_completed_by_project(project_id, u64::from(limit))
                .await?;
            debug!(%project_id, crawls = crawls.len(), "Loaded crawls for trend");
            Ok(trend_analyzer::build_trend(project_id, &crawls))
        })
        .await
    }

    pub async fn crawls(&self, project_id: Uuid) -> Result<Vec<CrawlSummary>, AnalyticsError> {
        observe("crawls", async {
            self.ensure_project(project_id).await?;
            let crawls = self.crawl_repo.find_by_project(project_id).await?;
            Ok(crawls.iter().map(CrawlSummary::from).collect())
        })
        .await
    }

    fn resolve_top_n(&self, query: &TopNQuery) -> Result<usize, AnalyticsError> {
        query
            .validate()
            .map_err(|e| AnalyticsError::Validation(e.to_string()))?;
        let limit = query
            .limit
            .unwrap_or(self.settings.default_top_n)
            .min(self.settings.max_top_n);
        Ok(limit as usize)
    }

    async fn ensure_project(&self, project_id: Uuid) -> Result<(), AnalyticsError> {
        if self.crawl_repo.project_exists(project_id).await? {
            Ok(())
        } else {
            Err(AnalyticsError::ProjectNotFound)
        }
    }

    /// 加载爬取并要求其已完成
    async fn load_completed(&self, crawl_id: Uuid) -> Result<Crawl, AnalyticsError> {
        let crawl = self
            .crawl_repo
            .find_by_id(crawl_id)
            .await?
            .ok_or(AnalyticsError::CrawlNotFound)?;
        ensure_completed(&crawl)?;
        Ok(crawl)
    }

    /// 并发加载页面与问题，只保留属于已加载页面的问题
    async fn load_pages_and_issues(
        &self,
        crawl_id: Uuid,
    ) -> Result<(Vec<Page>, Vec<Issue>), AnalyticsError> {
        let (pages, mut issues) = tokio::try_join!(
            self.page_repo.find_by_crawl_id(crawl_id),
            self.issue_repo.find_by_crawl_id(crawl_id)
        )?;
        let page_ids: HashSet<Uuid> = pages.iter().map(|p| p.id).collect();
        issues.retain(|issue| page_ids.contains(&issue.page_id));
        debug!(%crawl_id, pages = pages.len(), issues = issues.len(), "Loaded crawl data");
        Ok((pages, issues))
    }

    /// 解析项目级请求使用的爬取
    ///
    /// 指定爬取时必须属于该项目且已完成；未指定时取最新的已完成爬取，可能不存在
    async fn resolve_project_crawl(
        &self,
        project_id: Uuid,
        crawl_id: Option<Uuid>,
    ) -> Result<Option<Crawl>, AnalyticsError> {
        match crawl_id {
            Some(crawl_id) => {
                let crawl = self
                    .crawl_repo
                    .find_by_id(crawl_id)
                    .await?
                    .filter(|c| c.project_id == project_id)
                    .ok_or(AnalyticsError::CrawlNotFound)?;
                ensure_completed(&crawl)?;
                Ok(Some(crawl))
            }
            None => {
                self.ensure_project(project_id).await?;
                let latest = self.crawl_repo.find_latest_completed(project_id).await?;
                if latest.is_none() {
                    info!(%project_id, "Project has no completed crawl yet");
                }
                Ok(latest)
            }
        }
    }
}

fn ensure_completed(crawl: &Crawl) -> Result<(), AnalyticsError> {
    if crawl.is_completed() {
        Ok(())
    } else {
        warn!(crawl_id = %crawl.id, status = %crawl.status, "Crawl is not completed");
        Err(AnalyticsError::NotReady {
            crawl_id: crawl.id,
            status: crawl.status,
        })
    }
}
