// src/controller.rs — 表单事件 → 校验 → 重建展示面 → 派发渲染

use crate::overlay;
use crate::schema;
use crate::surface::{ImageSlot, Node, QrImage, Surface};
use crate::types::{FormError, RawFormInput};
use crate::wifi;
use anyhow::Result;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// 二维码渲染器接口：吃一个 WIFI: 串，吐一张图。
/// 实现是同步的 CPU 活，由 Controller 丢到后台任务执行。
pub trait QrRender: Send + Sync {
    fn render(&self, data: &str) -> Result<QrImage>;
}

/// 错误上报通道（外部协作者），拿到的只是对失败的描述
pub trait ErrorSink: Send + Sync {
    /// 管线校验失败（NoData / MissingField / InvalidEnum）
    fn form_error(&self, err: &FormError);
    /// 渲染器自身失败（不在三类校验错误之内）
    fn render_error(&self, desc: &str);
}

/// 控制器状态：空闲 / 处理中。
/// 渲染任务不算处理中，派发完就回 Idle，不等图出来。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtrlState {
    Idle,
    Processing,
}

/// 响应式控制器。独占展示面；change 和 submit 走同一条管线，
/// 校验失败只上报、绝不触碰展示面，上一次的渲染因此留在屏上。
pub struct Controller {
    surface: Surface,
    renderer: Arc<dyn QrRender>,
    errors: Arc<dyn ErrorSink>,
    state: CtrlState,
    /// 最近一次派发的渲染任务，供前端/测试等待
    last_render: Option<JoinHandle<()>>,
}

impl Controller {
    pub fn new(renderer: Arc<dyn QrRender>, errors: Arc<dyn ErrorSink>) -> Self {
        Self {
            surface: Surface::new(),
            renderer,
            errors,
            state: CtrlState::Idle,
            last_render: None,
        }
    }

    pub fn state(&self) -> CtrlState {
        self.state
    }

    /// 展示面的只读视图
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// 处理一次表单事件。需要在 tokio 运行时里调用（内部 spawn）。
    /// 任何失败都在这里消化掉，不会向事件循环抛东西。
    pub fn handle_event(&mut self, raw: RawFormInput) {
        self.state = CtrlState::Processing;
        if let Err(e) = self.process(raw) {
            self.errors.form_error(&e);
        }
        self.state = CtrlState::Idle;
    }

    fn process(&mut self, raw: RawFormInput) -> std::result::Result<(), FormError> {
        if raw.is_empty() {
            return Err(FormError::NoData);
        }
        let cred = schema::validate(&raw)?;

        // 只有校验通过才允许动展示面
        self.surface.clear();
        self.surface.append(overlay::present(&cred));
        let slot = ImageSlot::new();
        self.surface.append(Node::Image(slot.clone()));

        let data = wifi::serialize(&cred);
        let renderer = Arc::clone(&self.renderer);
        let errors = Arc::clone(&self.errors);
        // 派发后立刻回 Idle。槽是本轮新建的：
        // 若下一轮已重建展示面，迟到的写入落在失联的槽上。
        self.last_render = Some(tokio::spawn(async move {
            match renderer.render(&data) {
                Ok(img) => slot.fill(img),
                Err(e) => errors.render_error(&e.to_string()),
            }
        }));
        Ok(())
    }

    /// 等待最近一次渲染任务收尾（前端重绘和测试用）
    pub async fn settle(&mut self) {
        if let Some(handle) = self.last_render.take() {
            let _ = handle.await;
        }
    }
}
