use thiserror::Error;

/// 应用程序错误类型
///
/// 只出现在批次启动前；单个文档的错误不会越过 worker
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误（批次级致命错误）
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// OCR 服务错误
    #[error("OCR错误: {0}")]
    Ocr(#[from] OcrError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 设置项不存在
    #[error("设置项 {section}/{name} 不存在")]
    MissingSetting { section: String, name: String },
    /// 设置项为空
    #[error("设置项 {section}/{name} 为空")]
    EmptySetting { section: String, name: String },
    /// 设置来源无法读取
    #[error("无法读取设置来源 ({path}): {source}")]
    SourceUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("设置文件解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 文档存储错误
///
/// 存储本身是外部协作方，这里只保留它返回的原因文本
#[derive(Debug, Error)]
pub enum StoreError {
    /// 文档不存在
    #[error("文档 {0} 不存在")]
    NotFound(String),
    /// 存储后端返回的其他错误
    #[error("存储后端错误: {0}")]
    Backend(String),
}

/// OCR 服务错误
#[derive(Debug, Error)]
pub enum OcrError {
    /// 网络请求失败
    #[error("请求失败 ({url}): {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务返回非 2xx 状态码
    #[error("服务返回错误状态 ({url}): {status}")]
    BadStatus {
        url: String,
        status: reqwest::StatusCode,
    },
    /// 提交响应缺少 Operation-Location 头
    #[error("响应缺少 Operation-Location 头 ({url})")]
    MissingOperationLocation { url: String },
    /// 响应 JSON 无法解析
    #[error("JSON解析失败: {0}")]
    JsonParseFailed(#[from] serde_json::Error),
    /// HTTP 客户端构建失败
    #[error("HTTP客户端初始化失败: {0}")]
    ClientBuildFailed(#[source] reqwest::Error),
}

/// 单个文档处理错误
///
/// 每个变体都只在 worker 内部出现，出口处统一转为 `DocumentOutcome::Failed`
#[derive(Debug, Error)]
pub enum DocumentError {
    /// 无法判断文档是否有原生文件
    #[error("原生文件检查失败: {0}")]
    Eligibility(#[source] StoreError),
    /// 无法下载原生文件
    #[error("原生文件下载失败: {0}")]
    Retrieval(#[source] StoreError),
    /// 提交分析请求失败
    #[error("提交 OCR 分析失败: {0}")]
    Submission(#[source] OcrError),
    /// 远端作业失败或状态无法解析
    #[error("OCR 作业失败: {0}")]
    Poll(String),
    /// 超过轮询时限
    #[error("OCR 作业在 {elapsed_ms}ms 内未完成")]
    TimedOut { elapsed_ms: u128 },
    /// 写回文本或日志失败
    #[error("写入字段 {field} 失败: {source}")]
    Persistence {
        field: String,
        #[source]
        source: StoreError,
    },
}

// ========== 便捷构造函数 ==========

impl ConfigError {
    pub fn missing(section: impl Into<String>, name: impl Into<String>) -> Self {
        ConfigError::MissingSetting {
            section: section.into(),
            name: name.into(),
        }
    }

    pub fn empty(section: impl Into<String>, name: impl Into<String>) -> Self {
        ConfigError::EmptySetting {
            section: section.into(),
            name: name.into(),
        }
    }
}

impl OcrError {
    pub fn request_failed(url: impl Into<String>, source: reqwest::Error) -> Self {
        OcrError::RequestFailed {
            url: url.into(),
            source,
        }
    }
}

impl DocumentError {
    pub fn persistence(field: impl Into<String>, source: StoreError) -> Self {
        DocumentError::Persistence {
            field: field.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
