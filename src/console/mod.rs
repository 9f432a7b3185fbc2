// 控制台菜单
// 从任意异步输入读取命令，写到任意输出，测试时可以用脚本驱动

mod display;
mod event;
mod input;
mod journey;
mod location;
mod photo;
mod tag;

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::database::models::User;
use crate::error::{AppError, AppResult};
use crate::models::{UserLogin, UserRegistration};
use crate::services::Services;

/// 菜单处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Stay,
    Back,
    Exit,
}

pub struct Console<R, W> {
    services: Arc<Services>,
    lines: Lines<R>,
    out: W,
    current_user: Option<User>,
    closed: bool,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(services: Arc<Services>, input: R, out: W) -> Self {
        Self {
            services,
            lines: input.lines(),
            out,
            current_user: None,
            closed: false,
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// 主循环，选择 0 或输入结束时返回
    pub async fn run(&mut self) -> AppResult<()> {
        writeln!(self.out, "Welcome to TrailTales!")?;

        loop {
            writeln!(self.out, "\n--- Main menu ---")?;
            match &self.current_user {
                None => {
                    writeln!(self.out, "1. Register")?;
                    writeln!(self.out, "2. Log in")?;
                }
                Some(user) => {
                    writeln!(self.out, "Logged in as {}", user.username)?;
                    writeln!(self.out, "3. Journeys")?;
                    writeln!(self.out, "4. Tags")?;
                    writeln!(self.out, "5. Locations")?;
                    writeln!(self.out, "6. Events")?;
                    writeln!(self.out, "7. Photos")?;
                    writeln!(self.out, "8. Log out")?;
                }
            }
            writeln!(self.out, "0. Exit")?;

            let Some(choice) = self.choice().await? else {
                break;
            };
            let logged_in = self.current_user.is_some();

            let flow = match (choice.as_str(), logged_in) {
                ("0", _) => break,
                ("1", false) => {
                    let result = self.register().await;
                    self.report(result)?
                }
                ("2", false) => {
                    let result = self.login().await;
                    self.report(result)?
                }
                ("3", true) => self.journey_menu().await?,
                ("4", true) => self.tag_menu().await?,
                ("5", true) => self.location_menu().await?,
                ("6", true) => self.event_menu().await?,
                ("7", true) => self.photo_menu().await?,
                ("8", true) => {
                    if let Some(user) = self.current_user.take() {
                        tracing::info!("User {} logged out", user.username);
                    }
                    writeln!(self.out, "You have been logged out.")?;
                    Flow::Stay
                }
                _ => {
                    let result = self.invalid_choice();
                    self.report(result)?
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }

        writeln!(self.out, "Goodbye!")?;
        Ok(())
    }

    async fn register(&mut self) -> AppResult<()> {
        writeln!(self.out, "\n--- Register ---")?;
        let dto = UserRegistration {
            username: self.ask("Username: ").await?,
            email: self.ask("Email: ").await?,
            password: self.ask("Password: ").await?,
        };
        let user = self.services.users.register(&dto).await?;
        writeln!(
            self.out,
            "User {} registered successfully. You can now log in.",
            user.username
        )?;
        Ok(())
    }

    async fn login(&mut self) -> AppResult<()> {
        writeln!(self.out, "\n--- Log in ---")?;
        let dto = UserLogin {
            identifier: self.ask("Username or email: ").await?,
            password: self.ask("Password: ").await?,
        };
        let user = self.services.users.login(&dto).await?;
        writeln!(self.out, "Welcome, {}!", user.username)?;
        self.current_user = Some(user);
        Ok(())
    }

    /// 当前登录用户的副本，服务调用期间 `self` 仍可变借用
    fn acting_user(&self) -> AppResult<User> {
        self.current_user
            .clone()
            .ok_or_else(|| AppError::auth_failed("Please log in first"))
    }

    fn print_menu(&mut self, title: &str, items: &[&str]) -> AppResult<()> {
        writeln!(self.out, "\n--- {title} ---")?;
        for item in items {
            writeln!(self.out, "{item}")?;
        }
        Ok(())
    }

    fn invalid_choice(&mut self) -> AppResult<()> {
        writeln!(self.out, "Invalid choice. Try again.")?;
        Ok(())
    }

    /// 打印操作错误后继续菜单；输入结束时退出
    fn report(&mut self, result: AppResult<()>) -> AppResult<Flow> {
        match result {
            Ok(()) => Ok(Flow::Stay),
            Err(_) if self.closed => Ok(Flow::Exit),
            Err(AppError::Validation(messages)) => {
                writeln!(self.out, "Validation errors:")?;
                for message in messages {
                    writeln!(self.out, "- {message}")?;
                }
                Ok(Flow::Stay)
            }
            Err(e) => {
                tracing::debug!("Console operation failed: {:?}", e);
                writeln!(self.out, "Error: {e}")?;
                Ok(Flow::Stay)
            }
        }
    }
}
